//! Grantees and their capability maps

use log::debug;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::capability::{applicable_capabilities, is_applicable, Capability, Mode, ObjectType, ALL_CAPABILITIES};
use super::error::PermissionError;
use super::roles::role_definition;
use super::version::CapabilityVersion;
use crate::xml::{write_fragment, XmlElement};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GranteeKind {
    Group,
    User,
}

impl GranteeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GranteeKind::Group => "group",
            GranteeKind::User => "user",
        }
    }
}

impl fmt::Display for GranteeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GranteeKind {
    type Err = PermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "group" => Ok(GranteeKind::Group),
            "user" => Ok(GranteeKind::User),
            _ => Err(PermissionError::UnknownGranteeKind(s.to_string())),
        }
    }
}

/// Capability → mode
pub type CapabilityMap = BTreeMap<Capability, Mode>;

/// One capability whose mode differs between two grantees
///
/// `None` means the capability is absent from that map, which is not the same
/// as Unspecified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilityDifference {
    pub capability: Capability,
    pub ours: Option<Mode>,
    pub theirs: Option<Mode>,
}

/// A user or group holding a capability map for one object type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grantee {
    id: String,
    kind: GranteeKind,
    object_type: Option<ObjectType>,
    version: CapabilityVersion,
    capabilities: CapabilityMap,
}

impl Grantee {
    /// Create a grantee; with an object type every applicable capability
    /// starts out Unspecified
    pub fn new(
        kind: GranteeKind,
        id: impl Into<String>,
        object_type: Option<ObjectType>,
        version: CapabilityVersion,
    ) -> Self {
        let capabilities = object_type
            .map(|ot| {
                applicable_capabilities(version, ot)
                    .iter()
                    .map(|c| (*c, Mode::Unspecified))
                    .collect()
            })
            .unwrap_or_default();
        Self {
            id: id.into(),
            kind,
            object_type,
            version,
            capabilities,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> GranteeKind {
        self.kind
    }

    pub fn object_type(&self) -> Option<ObjectType> {
        self.object_type
    }

    pub fn version(&self) -> CapabilityVersion {
        self.version
    }

    pub fn capabilities(&self) -> &CapabilityMap {
        &self.capabilities
    }

    /// Current mode of a capability; `None` when absent from the map
    pub fn mode(&self, capability: Capability) -> Option<Mode> {
        self.capabilities.get(&capability).copied()
    }

    /// Set a capability by canonical or legacy name; `all` sets every
    /// applicable capability
    pub fn set_capability(&mut self, name: &str, mode: Mode) -> Result<(), PermissionError> {
        if mode == Mode::Unspecified {
            return Err(PermissionError::InvalidMode(mode.to_string()));
        }
        self.set_named(name, mode)
    }

    pub fn set_capability_to_unspecified(&mut self, name: &str) -> Result<(), PermissionError> {
        self.set_named(name, Mode::Unspecified)
    }

    fn set_named(&mut self, name: &str, mode: Mode) -> Result<(), PermissionError> {
        if name == ALL_CAPABILITIES {
            return self.set_all(mode);
        }
        let capability = Capability::from_name(name)?;
        if let Some(object_type) = self.object_type {
            if !is_applicable(self.version, object_type, capability) {
                return Err(PermissionError::NotApplicable {
                    capability: capability.name().to_string(),
                    object_type,
                    version: self.version,
                });
            }
        }
        self.capabilities.insert(capability, mode);
        Ok(())
    }

    /// Set every capability applicable to the object type
    pub fn set_all(&mut self, mode: Mode) -> Result<(), PermissionError> {
        let object_type = self.object_type.ok_or(PermissionError::MissingObjectType)?;
        for capability in applicable_capabilities(self.version, object_type) {
            self.capabilities.insert(*capability, mode);
        }
        Ok(())
    }

    /// Replace the map with the expansion of a role
    ///
    /// The map is cleared first, so capabilities the role does not mention
    /// become absent. Overrides that do not apply to the object type are
    /// skipped.
    pub fn apply_role(&mut self, role: &str) -> Result<(), PermissionError> {
        let object_type = self.object_type.ok_or(PermissionError::MissingObjectType)?;
        let definition = role_definition(self.version, object_type, role)?;
        debug!(
            "Applying {} role '{}' to {} {}",
            object_type, role, self.kind, self.id
        );

        self.capabilities.clear();
        if let Some(mode) = definition.blanket {
            self.set_all(mode)?;
        }
        for (capability, mode) in definition.overrides {
            if is_applicable(self.version, object_type, *capability) {
                self.capabilities.insert(*capability, *mode);
            } else {
                debug!("Role '{}' skips {}: not a {} capability", role, capability, object_type);
            }
        }
        Ok(())
    }

    /// Capabilities whose modes differ, in capability order
    pub fn diff(&self, other: &Grantee) -> Vec<CapabilityDifference> {
        Capability::ALL
            .into_iter()
            .filter_map(|capability| {
                let ours = self.mode(capability);
                let theirs = other.mode(capability);
                (ours != theirs).then_some(CapabilityDifference {
                    capability,
                    ours,
                    theirs,
                })
            })
            .collect()
    }

    /// True when both maps hold the same keys with the same modes
    pub fn equivalent(&self, other: &Grantee) -> bool {
        self.capabilities == other.capabilities
    }

    /// `<capabilities>` element listing every explicit mode
    pub fn capabilities_element(&self) -> XmlElement {
        self.capabilities
            .iter()
            .filter(|(_, mode)| **mode != Mode::Unspecified)
            .fold(XmlElement::new("capabilities"), |element, (capability, mode)| {
                element.with_child(
                    XmlElement::new("capability")
                        .with_attr("name", capability.name())
                        .with_attr("mode", mode.as_str()),
                )
            })
    }

    pub fn capabilities_xml(&self) -> Result<String, quick_xml::Error> {
        write_fragment(&self.capabilities_element())
    }

    fn same_identity(&self, other: &Grantee) -> bool {
        self.kind == other.kind && self.id == other.id
    }
}

/// True when every grantee in `new` has an equivalent counterpart with the
/// same identity in `existing`
///
/// Used to decide whether a permission update can be skipped.
pub fn grantee_lists_equivalent(new: &[Grantee], existing: &[Grantee]) -> bool {
    new.iter().all(|grantee| {
        existing
            .iter()
            .find(|candidate| candidate.same_identity(grantee))
            .is_some_and(|candidate| candidate.equivalent(grantee))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workbook_group(version: CapabilityVersion) -> Grantee {
        Grantee::new(GranteeKind::Group, "g-1", Some(ObjectType::Workbook), version)
    }

    #[test]
    fn test_new_grantee_is_fully_unspecified() {
        let g = workbook_group(CapabilityVersion::V2_3);
        assert_eq!(g.capabilities().len(), 14);
        assert!(g.capabilities().values().all(|m| *m == Mode::Unspecified));
        assert_eq!(g.mode(Capability::Connect), None);
    }

    #[test]
    fn test_set_capability_translates_legacy_name() {
        let mut g = workbook_group(CapabilityVersion::V2_3);
        g.set_capability("View", Mode::Allow).unwrap();
        g.set_capability("ExportImage", Mode::Deny).unwrap();
        assert_eq!(g.mode(Capability::Read), Some(Mode::Allow));
        assert_eq!(g.mode(Capability::ExportImage), Some(Mode::Deny));
    }

    #[test]
    fn test_set_capability_rejects_bad_input() {
        let mut g = workbook_group(CapabilityVersion::V2_3);
        assert!(matches!(
            g.set_capability("Fly", Mode::Allow),
            Err(PermissionError::UnknownCapability(_))
        ));
        assert!(matches!(
            g.set_capability("Read", Mode::Unspecified),
            Err(PermissionError::InvalidMode(_))
        ));
        assert!(matches!(
            g.set_capability("Connect", Mode::Allow),
            Err(PermissionError::NotApplicable { .. })
        ));
    }

    #[test]
    fn test_all_pseudo_capability_is_never_stored() {
        let mut g = Grantee::new(GranteeKind::User, "u-1", Some(ObjectType::Project), CapabilityVersion::V2_2);
        g.set_capability("all", Mode::Deny).unwrap();
        assert_eq!(g.capabilities().len(), 3);
        assert!(g.capabilities().values().all(|m| *m == Mode::Deny));
    }

    #[test]
    fn test_set_all_needs_object_type() {
        let mut g = Grantee::new(GranteeKind::User, "u-1", None, CapabilityVersion::V2_2);
        assert_eq!(g.set_all(Mode::Allow), Err(PermissionError::MissingObjectType));
        assert_eq!(g.apply_role("Viewer"), Err(PermissionError::MissingObjectType));
    }

    #[test]
    fn test_blanket_role_with_overrides() {
        let mut g = workbook_group(CapabilityVersion::V2_3);
        g.apply_role("Interactor").unwrap();
        assert_eq!(g.mode(Capability::Read), Some(Mode::Allow));
        assert_eq!(g.mode(Capability::WebAuthoring), Some(Mode::Allow));
        assert_eq!(g.mode(Capability::Write), Some(Mode::Unspecified));
        assert_eq!(g.mode(Capability::Delete), Some(Mode::Unspecified));
        assert_eq!(g.capabilities().len(), 14);
    }

    #[test]
    fn test_role_without_blanket_clears_map() {
        let mut g = Grantee::new(GranteeKind::Group, "g", Some(ObjectType::Datasource), CapabilityVersion::V2_1);
        g.apply_role("Connector").unwrap();
        let expected: CapabilityMap = [(Capability::Read, Mode::Allow), (Capability::Connect, Mode::Allow)]
            .into_iter()
            .collect();
        assert_eq!(g.capabilities(), &expected);
    }

    #[test]
    fn test_legacy_role_skips_inapplicable_overrides() {
        let mut g = workbook_group(CapabilityVersion::V2_0);
        g.apply_role("Editor").unwrap();
        assert_eq!(g.mode(Capability::Connect), None);
        assert_eq!(g.mode(Capability::ProjectLeader), None);
        assert!(g.capabilities().values().all(|m| *m == Mode::Allow));
    }

    #[test]
    fn test_unknown_role() {
        let mut g = workbook_group(CapabilityVersion::V2_3);
        assert!(matches!(g.apply_role("Connector"), Err(PermissionError::UnknownRole { .. })));
    }

    #[test]
    fn test_absent_is_not_unspecified() {
        let fresh = workbook_group(CapabilityVersion::V2_3);
        let mut viewer = workbook_group(CapabilityVersion::V2_3);
        viewer.apply_role("Viewer").unwrap();
        viewer.set_capability_to_unspecified("View").unwrap();
        viewer.set_capability_to_unspecified("Export Image").unwrap();
        viewer.set_capability_to_unspecified("View Summary Data").unwrap();
        viewer.set_capability_to_unspecified("View Comments").unwrap();
        viewer.set_capability_to_unspecified("Add Comment").unwrap();

        assert!(!fresh.equivalent(&viewer));
        let diff = fresh.diff(&viewer);
        assert!(diff.iter().all(|d| d.ours == Some(Mode::Unspecified) && d.theirs.is_none()));
    }

    #[test]
    fn test_capabilities_xml_skips_unspecified() {
        let mut g = Grantee::new(GranteeKind::Group, "g", Some(ObjectType::Project), CapabilityVersion::V2_3);
        g.set_capability("Read", Mode::Allow).unwrap();
        g.set_capability("Save", Mode::Deny).unwrap();
        assert_eq!(
            g.capabilities_xml().unwrap(),
            "<capabilities>\n  <capability name=\"Read\" mode=\"Allow\"/>\n  <capability name=\"Write\" mode=\"Deny\"/>\n</capabilities>"
        );
    }

    #[test]
    fn test_grantee_lists_match_on_identity() {
        let mut a = workbook_group(CapabilityVersion::V2_3);
        a.apply_role("Viewer").unwrap();
        let mut b = a.clone();
        let other = Grantee::new(GranteeKind::User, "g-1", Some(ObjectType::Workbook), CapabilityVersion::V2_3);

        assert!(grantee_lists_equivalent(&[a.clone()], &[other.clone(), b.clone()]));
        assert!(!grantee_lists_equivalent(&[a.clone()], &[other]));

        b.set_capability("Filter", Mode::Deny).unwrap();
        assert!(!grantee_lists_equivalent(&[a], &[b]));
    }
}

//! Content role tables
//!
//! A role expands to an optional blanket mode over every applicable
//! capability, followed by per-capability overrides applied in order.

use super::capability::{Capability, Capability::*, Mode, ObjectType};
use super::error::PermissionError;
use super::version::CapabilityVersion;

/// How one role expands into capability modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleDefinition {
    pub name: &'static str,
    /// Mode applied to every applicable capability before the overrides
    pub blanket: Option<Mode>,
    pub overrides: &'static [(Capability, Mode)],
}

const fn role(
    name: &'static str,
    blanket: Option<Mode>,
    overrides: &'static [(Capability, Mode)],
) -> RoleDefinition {
    RoleDefinition {
        name,
        blanket,
        overrides,
    }
}

const A: Mode = Mode::Allow;
const U: Mode = Mode::Unspecified;

// ----------------------------------------------------------------------
// 2.0: one catalog shared by every object type
// ----------------------------------------------------------------------

const LEGACY_PUBLISHER: RoleDefinition = role(
    "Publisher",
    Some(A),
    &[(Connect, U), (ExportXml, U), (ChangeHierarchy, U), (Delete, U), (ChangePermissions, U), (ProjectLeader, U)],
);
const LEGACY_INTERACTOR: RoleDefinition = role(
    "Interactor",
    Some(A),
    &[
        (Connect, U),
        (ExportXml, U),
        (ChangeHierarchy, U),
        (Delete, U),
        (ChangePermissions, U),
        (ProjectLeader, U),
        (Write, U),
    ],
);
const LEGACY_VIEWER: RoleDefinition = role(
    "Viewer",
    None,
    &[(Read, A), (ExportImage, A), (ExportData, A), (ViewComments, A), (AddComment, A)],
);
const LEGACY_EDITOR: RoleDefinition = role("Editor", Some(A), &[(Connect, U), (ProjectLeader, U)]);
const LEGACY_DS_CONNECTOR: RoleDefinition = role("Data Source Connector", None, &[(Connect, U), (ProjectLeader, U)]);
const LEGACY_DS_EDITOR: RoleDefinition = role(
    "Data Source Editor",
    None,
    &[(Read, A), (Connect, A), (Write, A), (ExportXml, A), (Delete, A), (ChangePermissions, A)],
);
const LEGACY_PROJECT_LEADER: RoleDefinition = role("Project Leader", None, &[(ProjectLeader, A)]);

const LEGACY_PROJECT_ROLES: &[RoleDefinition] = &[
    LEGACY_VIEWER,
    LEGACY_INTERACTOR,
    LEGACY_EDITOR,
    LEGACY_DS_CONNECTOR,
    LEGACY_DS_EDITOR,
    LEGACY_PUBLISHER,
    LEGACY_PROJECT_LEADER,
];
const LEGACY_WORKBOOK_ROLES: &[RoleDefinition] = &[LEGACY_VIEWER, LEGACY_INTERACTOR, LEGACY_EDITOR];
const LEGACY_DATASOURCE_ROLES: &[RoleDefinition] = &[LEGACY_DS_CONNECTOR, LEGACY_DS_EDITOR];

// ----------------------------------------------------------------------
// 2.1 and later
// ----------------------------------------------------------------------

const PROJECT_ROLES: &[RoleDefinition] = &[
    role("Viewer", None, &[(Read, A)]),
    role("Publisher", None, &[(Read, A), (Write, A)]),
    role("Project Leader", None, &[(ProjectLeader, A)]),
];
const WORKBOOK_ROLES: &[RoleDefinition] = &[
    LEGACY_VIEWER,
    role(
        "Interactor",
        Some(A),
        &[(ExportXml, U), (ChangeHierarchy, U), (Delete, U), (ChangePermissions, U), (Write, U)],
    ),
    role("Editor", Some(A), &[]),
];
const DATASOURCE_ROLES: &[RoleDefinition] = &[
    role("Editor", Some(A), &[]),
    role("Connector", None, &[(Read, A), (Connect, A)]),
];

/// Every role defined for an object type at a version
pub fn roles(version: CapabilityVersion, object_type: ObjectType) -> &'static [RoleDefinition] {
    match (version.has_legacy_roles(), object_type) {
        (true, ObjectType::Project) => LEGACY_PROJECT_ROLES,
        (true, ObjectType::Workbook) => LEGACY_WORKBOOK_ROLES,
        (true, ObjectType::Datasource) => LEGACY_DATASOURCE_ROLES,
        (false, ObjectType::Project) => PROJECT_ROLES,
        (false, ObjectType::Workbook) => WORKBOOK_ROLES,
        (false, ObjectType::Datasource) => DATASOURCE_ROLES,
    }
}

/// Role names for an object type at a version, in display order
pub fn role_names(version: CapabilityVersion, object_type: ObjectType) -> Vec<&'static str> {
    roles(version, object_type).iter().map(|r| r.name).collect()
}

pub fn role_definition(
    version: CapabilityVersion,
    object_type: ObjectType,
    name: &str,
) -> Result<&'static RoleDefinition, PermissionError> {
    roles(version, object_type)
        .iter()
        .find(|r| r.name == name)
        .ok_or_else(|| PermissionError::UnknownRole {
            role: name.to_string(),
            object_type,
            version,
        })
}

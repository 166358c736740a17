//! Capabilities, modes and permissionable object types

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use super::error::PermissionError;
use super::version::CapabilityVersion;

/// Name of the pseudo-capability meaning "every applicable capability"
pub const ALL_CAPABILITIES: &str = "all";

/// A named permission, identified by its API name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Capability {
    AddComment,
    ChangeHierarchy,
    ChangePermissions,
    Connect,
    Delete,
    ExportData,
    ExportImage,
    ExportXml,
    Filter,
    ProjectLeader,
    Read,
    ShareView,
    ViewComments,
    ViewUnderlyingData,
    WebAuthoring,
    Write,
}

use Capability::*;

impl Capability {
    pub const ALL: [Capability; 16] = [
        AddComment,
        ChangeHierarchy,
        ChangePermissions,
        Connect,
        Delete,
        ExportData,
        ExportImage,
        ExportXml,
        Filter,
        ProjectLeader,
        Read,
        ShareView,
        ViewComments,
        ViewUnderlyingData,
        WebAuthoring,
        Write,
    ];

    /// Canonical API name
    pub fn name(&self) -> &'static str {
        match self {
            AddComment => "AddComment",
            ChangeHierarchy => "ChangeHierarchy",
            ChangePermissions => "ChangePermissions",
            Connect => "Connect",
            Delete => "Delete",
            ExportData => "ExportData",
            ExportImage => "ExportImage",
            ExportXml => "ExportXml",
            Filter => "Filter",
            ProjectLeader => "ProjectLeader",
            Read => "Read",
            ShareView => "ShareView",
            ViewComments => "ViewComments",
            ViewUnderlyingData => "ViewUnderlyingData",
            WebAuthoring => "WebAuthoring",
            Write => "Write",
        }
    }

    /// Name shown in the server's permission UI
    pub fn legacy_name(&self) -> &'static str {
        match self {
            AddComment => "Add Comment",
            ChangeHierarchy => "Move",
            ChangePermissions => "Set Permissions",
            Connect => "Connect",
            Delete => "Delete",
            ExportData => "View Summary Data",
            ExportImage => "Export Image",
            ExportXml => "Download",
            Filter => "Filter",
            ProjectLeader => "Project Leader",
            Read => "View",
            ShareView => "Share Customized",
            ViewComments => "View Comments",
            ViewUnderlyingData => "View Underlying Data",
            WebAuthoring => "Web Edit",
            Write => "Save",
        }
    }

    /// Look up a capability by canonical or legacy name
    pub fn from_name(name: &str) -> Result<Self, PermissionError> {
        Self::ALL
            .into_iter()
            .find(|c| c.name() == name)
            .or_else(|| Self::ALL.into_iter().find(|c| c.legacy_name() == name))
            .ok_or_else(|| PermissionError::UnknownCapability(name.to_string()))
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Capability {
    type Err = PermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

/// Capability mode; Unspecified is the no-op state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Allow,
    Deny,
    Unspecified,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Allow => "Allow",
            Mode::Deny => "Deny",
            Mode::Unspecified => "Unspecified",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Only the explicit modes parse; the names are case-sensitive
impl FromStr for Mode {
    type Err = PermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Allow" => Ok(Mode::Allow),
            "Deny" => Ok(Mode::Deny),
            other => Err(PermissionError::InvalidMode(other.to_string())),
        }
    }
}

/// Content object a permission applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum ObjectType {
    Project,
    Workbook,
    Datasource,
}

impl ObjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Project => "project",
            ObjectType::Workbook => "workbook",
            ObjectType::Datasource => "datasource",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ObjectType {
    type Err = PermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "project" => Ok(ObjectType::Project),
            "workbook" => Ok(ObjectType::Workbook),
            "datasource" => Ok(ObjectType::Datasource),
            _ => Err(PermissionError::UnknownObjectType(s.to_string())),
        }
    }
}

impl TryFrom<String> for ObjectType {
    type Error = PermissionError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

const PROJECT_2_0: &[Capability] = &Capability::ALL;

const WORKBOOK_2_0: &[Capability] = &[
    AddComment,
    ChangeHierarchy,
    ChangePermissions,
    Delete,
    ExportData,
    ExportImage,
    ExportXml,
    Filter,
    Read,
    ShareView,
    ViewComments,
    ViewUnderlyingData,
    WebAuthoring,
    Write,
];

const DATASOURCE: &[Capability] = &[ChangePermissions, Connect, Delete, ExportXml, Read, Write];

const PROJECT_2_1: &[Capability] = &[ProjectLeader, Read, Write];

/// Unchanged from 2.0
const WORKBOOK_2_1: &[Capability] = WORKBOOK_2_0;

/// Capabilities a grantee may hold on an object type at a version, in name order
pub fn applicable_capabilities(version: CapabilityVersion, object_type: ObjectType) -> &'static [Capability] {
    match (version.has_legacy_roles(), object_type) {
        (true, ObjectType::Project) => PROJECT_2_0,
        (true, ObjectType::Workbook) => WORKBOOK_2_0,
        (false, ObjectType::Project) => PROJECT_2_1,
        (false, ObjectType::Workbook) => WORKBOOK_2_1,
        (_, ObjectType::Datasource) => DATASOURCE,
    }
}

pub fn is_applicable(version: CapabilityVersion, object_type: ObjectType, capability: Capability) -> bool {
    applicable_capabilities(version, object_type).contains(&capability)
}

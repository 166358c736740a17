//! Permission model errors

use thiserror::Error;

use super::capability::ObjectType;
use super::version::CapabilityVersion;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermissionError {
    #[error("'{0}' is not a capability name")]
    UnknownCapability(String),

    #[error("capability {capability} does not apply to a {object_type} in API {version}")]
    NotApplicable {
        capability: String,
        object_type: ObjectType,
        version: CapabilityVersion,
    },

    /// Only Allow and Deny can be set explicitly
    #[error("'{0}' is not a valid capability mode, expected Allow or Deny")]
    InvalidMode(String),

    #[error("there is no {object_type} role called '{role}' in API {version}")]
    UnknownRole {
        role: String,
        object_type: ObjectType,
        version: CapabilityVersion,
    },

    #[error("unsupported version '{0}'")]
    UnknownVersion(String),

    #[error("'{0}' is not a permissionable object type, expected project, workbook or datasource")]
    UnknownObjectType(String),

    #[error("'{0}' is not a grantee kind, expected group or user")]
    UnknownGranteeKind(String),

    #[error("grantee has no object type set")]
    MissingObjectType,
}

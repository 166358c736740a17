//! Permission model (noun module)
//!
//! Versioned capability and role tables plus the grantee state machine that
//! projects a role onto a concrete capability map. Independent of the
//! datasource builder.

mod capability;
mod error;
mod grantee;
mod roles;
mod version;

pub use capability::{applicable_capabilities, is_applicable, Capability, Mode, ObjectType, ALL_CAPABILITIES};
pub use error::PermissionError;
pub use grantee::{grantee_lists_equivalent, CapabilityDifference, CapabilityMap, Grantee, GranteeKind};
pub use roles::{role_definition, role_names, roles, RoleDefinition};
pub use version::CapabilityVersion;

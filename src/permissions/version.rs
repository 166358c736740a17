//! API protocol versions

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use super::error::PermissionError;

/// Protocol level that selects the capability set and role tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub enum CapabilityVersion {
    V2_0,
    V2_1,
    V2_2,
    V2_3,
}

impl CapabilityVersion {
    pub const ALL: [CapabilityVersion; 4] = [Self::V2_0, Self::V2_1, Self::V2_2, Self::V2_3];

    /// Map a server release to its API version
    pub fn from_server_version(server_version: &str) -> Result<Self, PermissionError> {
        match server_version.trim() {
            "9.0" | "9.1" => Ok(Self::V2_0),
            "9.2" => Ok(Self::V2_1),
            "9.3" => Ok(Self::V2_2),
            "10.0" => Ok(Self::V2_3),
            other => Err(PermissionError::UnknownVersion(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V2_0 => "2.0",
            Self::V2_1 => "2.1",
            Self::V2_2 => "2.2",
            Self::V2_3 => "2.3",
        }
    }

    /// 2.0 uses the older role catalog shared by every object type
    pub fn has_legacy_roles(&self) -> bool {
        matches!(self, Self::V2_0)
    }
}

impl fmt::Display for CapabilityVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CapabilityVersion {
    type Err = PermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s.trim())
            .ok_or_else(|| PermissionError::UnknownVersion(s.to_string()))
    }
}

impl TryFrom<String> for CapabilityVersion {
    type Error = PermissionError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

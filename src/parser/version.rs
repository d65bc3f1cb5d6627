//! ADQL language versions

use std::fmt;
use std::str::FromStr;

/// Version of the ADQL grammar a query is parsed with
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AdqlVersion {
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "v2.0"))]
    V2_0,
    #[cfg_attr(feature = "serde", serde(rename = "v2.1"))]
    V2_1,
}

impl AdqlVersion {
    /// All versions, oldest first
    pub const ALL: [AdqlVersion; 2] = [AdqlVersion::V2_0, AdqlVersion::V2_1];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::V2_0 => "v2.0",
            Self::V2_1 => "v2.1",
        }
    }
}

impl fmt::Display for AdqlVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdqlVersion {
    type Err = String;

    /// Accepts `2.0`, `v2.0`, `2_0`, `V2_1`... (case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', ".");
        match normalized.trim_start_matches('v') {
            "2.0" => Ok(Self::V2_0),
            "2.1" => Ok(Self::V2_1),
            _ => Err(format!("Unknown ADQL version: \"{s}\"!")),
        }
    }
}

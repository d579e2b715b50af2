// File: syncboard-common/src/models/integration.rs

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

/// External services whose account-link state the sync server tracks.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Integration {
    Nokia,
    FatSecret,
}

impl Integration {
    /// Row order of the status table.
    pub const ALL: [Integration; 2] = [Integration::Nokia, Integration::FatSecret];

    /// Human name, also used to build the link endpoint (`sync<Name>`).
    pub fn display_name(&self) -> &'static str {
        match self {
            Integration::Nokia => "Nokia",
            Integration::FatSecret => "FatSecret",
        }
    }

    /// Key used in the `syncStatus` JSON body.
    pub fn status_key(&self) -> &'static str {
        match self {
            Integration::Nokia => "nokia",
            Integration::FatSecret => "fatsecret",
        }
    }

    /// Relative endpoint that starts the linking flow.
    pub fn link_endpoint(&self) -> String {
        format!("sync{}", self.display_name())
    }

    /// Whether the link control is wired up for this integration.
    /// FatSecret's server side flow is not hooked up yet, so its control
    /// is shown disabled.
    pub fn linkable(&self) -> bool {
        match self {
            Integration::Nokia => true,
            Integration::FatSecret => false,
        }
    }
}

impl fmt::Display for Integration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Integration {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nokia" | "withings" => Ok(Integration::Nokia),
            "fatsecret" => Ok(Integration::FatSecret),
            _ => Err(format!("Unknown integration: {}", s)),
        }
    }
}

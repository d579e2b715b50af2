// File: syncboard-common/src/models/status.rs

use std::fmt;
use serde::{Deserialize, Serialize};

use crate::models::integration::Integration;

/// Raw link state as reported by the `syncStatus` endpoint.
///
/// Both fields are required; a body missing either one fails to
/// deserialize. Unknown fields are ignored.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq)]
pub struct SyncStatus {
    pub nokia: bool,
    pub fatsecret: bool,
}

impl SyncStatus {
    pub fn is_linked(&self, integration: Integration) -> bool {
        match integration {
            Integration::Nokia => self.nokia,
            Integration::FatSecret => self.fatsecret,
        }
    }
}

/// Body of a `sync<Name>` response.
#[derive(Debug, Serialize, Deserialize, Clone, Eq, PartialEq)]
pub struct LinkTarget {
    pub url: String,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum LinkLabel {
    #[default]
    Loading,
    Linked,
    NotLinked,
    Error,
}

impl LinkLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkLabel::Loading => "Loading",
            LinkLabel::Linked => "Linked",
            LinkLabel::NotLinked => "Not Linked",
            LinkLabel::Error => "Error",
        }
    }
}

impl From<bool> for LinkLabel {
    fn from(linked: bool) -> Self {
        if linked {
            LinkLabel::Linked
        } else {
            LinkLabel::NotLinked
        }
    }
}

impl fmt::Display for LinkLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the status table shows. Owned by the view.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub struct DisplayStatus {
    pub nokia: LinkLabel,
    pub fatsecret: LinkLabel,
}

impl DisplayStatus {
    pub fn loading() -> Self {
        Self::default()
    }

    pub fn errored() -> Self {
        Self {
            nokia: LinkLabel::Error,
            fatsecret: LinkLabel::Error,
        }
    }

    pub fn get(&self, integration: Integration) -> LinkLabel {
        match integration {
            Integration::Nokia => self.nokia,
            Integration::FatSecret => self.fatsecret,
        }
    }

    pub fn set(&mut self, integration: Integration, label: LinkLabel) {
        match integration {
            Integration::Nokia => self.nokia = label,
            Integration::FatSecret => self.fatsecret = label,
        }
    }
}

impl From<SyncStatus> for DisplayStatus {
    fn from(status: SyncStatus) -> Self {
        Self {
            nokia: status.nokia.into(),
            fatsecret: status.fatsecret.into(),
        }
    }
}

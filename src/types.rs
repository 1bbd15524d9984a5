//! Read-only views of host-owned records.
//!
//! The host app owns media items and sites; this crate only reads the few
//! fields its decisions depend on. The traits are what the presenter takes;
//! the plain structs let the CLI and tests feed records from JSON.

use serde::{Deserialize, Serialize};

pub trait MediaRecord {
    /// Upload state as stored by the host (`"uploading"`, `"deleted"`, ...).
    fn upload_state(&self) -> Option<&str>;
}

pub trait SiteRecord {
    /// Site is backed by the managed REST API (and its capability model).
    fn uses_managed_api(&self) -> bool;
    fn has_upload_capability(&self) -> bool;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaItem {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_state: Option<String>,
}

impl MediaRecord for MediaItem {
    fn upload_state(&self) -> Option<&str> {
        self.upload_state.as_deref()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Site {
    pub uses_managed_api: bool,
    pub has_upload_capability: bool,
}

impl SiteRecord for Site {
    fn uses_managed_api(&self) -> bool {
        self.uses_managed_api
    }

    fn has_upload_capability(&self) -> bool {
        self.has_upload_capability
    }
}

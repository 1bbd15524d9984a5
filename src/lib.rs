//! # media-capture
//!
//! Acquisition and presentation helpers for a mobile media library: build
//! the requests that open the camera or gallery, classify media URLs, and
//! decide how thumbnails are shown.
//!
//! Nothing here talks to the network or keeps state between calls. Every
//! platform service (storage, content-URI resolution, dispatch, media index,
//! image loading) is reached through a trait in [`platform`], so the logic
//! runs the same against a phone, a desktop shim, or a test double.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`capture`] | Capture-request builder: gallery, camera, pick-or-capture, dispatch |
//! | [`launch`] | Platform-neutral launch descriptors and correlation codes |
//! | [`classify`] | Extension-based [`MediaKind`](classify::MediaKind) and placeholder icons |
//! | [`present`] | Delete/upload permissions, video poster URLs, thumbnail rendering |
//! | [`platform`] | Collaborator traits plus filesystem-backed implementations |
//! | [`types`] | Read-only media item and site records |
//! | [`config`] | `media-capture.toml` loading and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Failure Model
//!
//! Camera preparation can fail three ways, all reported as
//! [`CaptureError`](capture::CaptureError) values:
//!
//! ```text
//! StorageUnavailable    storage not mounted          user can fix (mount/insert)
//! DirectoryUnavailable  capture dir not creatable    needs storage management
//! ProviderUnavailable   authority not resolvable     build/config defect
//! ```
//!
//! A camera-only request surfaces the error. The pick-or-capture flow drops
//! the camera option instead and still returns the gallery chooser.

pub mod capture;
pub mod classify;
pub mod config;
pub mod launch;
pub mod output;
pub mod platform;
pub mod present;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;

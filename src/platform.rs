//! Collaborator seams.
//!
//! Everything platform-provided sits behind a small trait so the builder and
//! presenter stay pure decision logic:
//!
//! | Trait | Collaborator |
//! |---|---|
//! | [`ExternalStorage`] | mount state, public media directory, directory creation |
//! | [`UriResolver`] | capability-token (content URI) resolution for an authority |
//! | [`Clock`] | epoch milliseconds for unique capture names |
//! | [`DeviceInfo`] | camera presence |
//! | [`SessionGuard`] | lock-timeout extension before an external app takes over |
//! | [`Launcher`] | activity-result dispatch with a correlation code |
//! | [`MediaScanner`] | fire-and-forget media-index notification |
//! | [`ImageLoader`] / [`ThumbnailView`] | remote image loading into a presentation surface |
//!
//! The filesystem-backed implementations ([`FsStorage`], [`LocalUriResolver`],
//! [`SystemClock`]) back the CLI and the integration tests.

use crate::classify::Icon;
use crate::launch::{LaunchRequest, RequestCode};
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use url::Url;

/// Why a capability token could not be resolved.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("no provider registered for authority {0}")]
    NoProvider(String),
}

pub trait ExternalStorage {
    fn is_mounted(&self) -> bool;

    /// World-writable, externally visible media directory (e.g. `DCIM`).
    fn public_media_dir(&self) -> PathBuf;

    /// Create `dir` and any missing parents. Succeeds if it already exists.
    fn ensure_dir(&self, dir: &Path) -> io::Result<()>;
}

pub trait UriResolver {
    fn resolve(&self, path: &Path, authority: &str) -> Result<Url, ResolveError>;
}

pub trait Clock {
    fn now_millis(&self) -> i64;
}

pub trait DeviceInfo {
    fn has_camera(&self) -> bool;
}

pub trait SessionGuard {
    fn extend_timeout(&self);
}

pub trait Launcher {
    fn start_for_result(&self, request: &LaunchRequest, code: RequestCode);
}

/// Completion callback for [`MediaScanner::scan_file`]: `(path, indexed uri)`.
pub type ScanCompleted = Box<dyn FnOnce(&Path, Option<&Url>) + Send>;

pub trait MediaScanner {
    /// Queue `path` for indexing. Must not block on the scan itself.
    fn scan_file(&self, path: &Path, on_complete: ScanCompleted);
}

/// Presentation surface a thumbnail is rendered into.
pub trait ThumbnailView {
    /// Show a fixed icon, or clear the view with `None`.
    fn set_image(&mut self, icon: Option<Icon>);
    fn set_default_image(&mut self, icon: Icon);
    fn set_error_image(&mut self, icon: Icon);
    fn set_tag(&mut self, tag: &str);
}

pub trait ImageLoader {
    fn load(&self, url: &str, view: &mut dyn ThumbnailView);
}

// =============================================================================
// Filesystem-backed implementations
// =============================================================================

/// External storage rooted at a local directory.
///
/// The storage counts as mounted while `root` is an existing directory. A
/// relative root is taken against the current directory, so every path
/// handed out is absolute.
#[derive(Debug, Clone)]
pub struct FsStorage {
    root: PathBuf,
    media_dir: String,
}

impl FsStorage {
    pub fn new(root: impl Into<PathBuf>, media_dir: impl Into<String>) -> Self {
        Self {
            root: absolute_root(root.into()),
            media_dir: media_dir.into(),
        }
    }
}

impl ExternalStorage for FsStorage {
    fn is_mounted(&self) -> bool {
        self.root.is_dir()
    }

    fn public_media_dir(&self) -> PathBuf {
        self.root.join(&self.media_dir)
    }

    fn ensure_dir(&self, dir: &Path) -> io::Result<()> {
        if dir.is_dir() {
            return Ok(());
        }
        fs::create_dir_all(dir)
    }
}

/// Resolves files under a storage root to `content://<authority>/external/...`.
///
/// Only authorities passed to [`LocalUriResolver::new`] are registered;
/// anything else fails with [`ResolveError::NoProvider`]. Paths must be plain
/// descendants of the root: `.` and `..` components are rejected so the URI
/// always names the same file as the path.
#[derive(Debug, Clone)]
pub struct LocalUriResolver {
    root: PathBuf,
    authorities: BTreeSet<String>,
}

impl LocalUriResolver {
    pub fn new<I, S>(root: impl Into<PathBuf>, authorities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            root: absolute_root(root.into()),
            authorities: authorities.into_iter().map(Into::into).collect(),
        }
    }
}

impl UriResolver for LocalUriResolver {
    fn resolve(&self, path: &Path, authority: &str) -> Result<Url, ResolveError> {
        if !self.authorities.contains(authority) {
            return Err(ResolveError::NoProvider(authority.to_string()));
        }
        let relative = path.strip_prefix(&self.root).map_err(|_| {
            ResolveError::InvalidArgument(format!(
                "{} is outside {}",
                path.display(),
                self.root.display()
            ))
        })?;
        let mut url = Url::parse(&format!("content://{authority}/external"))
            .map_err(|e| ResolveError::InvalidArgument(format!("{authority}: {e}")))?;
        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                ResolveError::InvalidArgument(format!("{authority}: not a base URL"))
            })?;
            for component in relative.components() {
                let Component::Normal(name) = component else {
                    return Err(ResolveError::InvalidArgument(format!(
                        "{} is not a plain path below {}",
                        path.display(),
                        self.root.display()
                    )));
                };
                segments.push(&name.to_string_lossy());
            }
        }
        Ok(url)
    }
}

/// `root` made absolute against the current directory. Left as given when
/// the current directory is unavailable.
fn absolute_root(root: PathBuf) -> PathBuf {
    std::path::absolute(&root).unwrap_or(root)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Device whose camera presence is known up front.
#[derive(Debug, Clone, Copy)]
pub struct FixedDevice {
    pub camera: bool,
}

impl DeviceInfo for FixedDevice {
    fn has_camera(&self) -> bool {
        self.camera
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn fs_storage_mounted_when_root_exists() {
        let tmp = TempDir::new().unwrap();
        assert!(FsStorage::new(tmp.path(), "DCIM").is_mounted());
        assert!(!FsStorage::new(tmp.path().join("missing"), "DCIM").is_mounted());
    }

    #[test]
    fn fs_storage_public_media_dir() {
        let storage = FsStorage::new("/storage/emulated/0", "DCIM");
        assert_eq!(
            storage.public_media_dir(),
            PathBuf::from("/storage/emulated/0/DCIM")
        );
    }

    #[test]
    fn ensure_dir_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let storage = FsStorage::new(tmp.path(), "DCIM");
        let dir = storage.public_media_dir().join("Camera");
        storage.ensure_dir(&dir).unwrap();
        storage.ensure_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn ensure_dir_fails_through_a_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("DCIM"), b"not a directory").unwrap();
        let storage = FsStorage::new(tmp.path(), "DCIM");
        assert!(storage
            .ensure_dir(&storage.public_media_dir().join("Camera"))
            .is_err());
    }

    #[test]
    fn resolver_builds_content_uri() {
        let resolver = LocalUriResolver::new("/storage", ["org.example.provider"]);
        let url = resolver
            .resolve(
                Path::new("/storage/DCIM/Camera/wp-42.jpg"),
                "org.example.provider",
            )
            .unwrap();
        assert_eq!(
            url.as_str(),
            "content://org.example.provider/external/DCIM/Camera/wp-42.jpg"
        );
    }

    #[test]
    fn resolver_rejects_unknown_authority() {
        let resolver = LocalUriResolver::new("/storage", ["org.example.provider"]);
        let err = resolver
            .resolve(Path::new("/storage/a.jpg"), "org.other.provider")
            .unwrap_err();
        assert_eq!(err, ResolveError::NoProvider("org.other.provider".into()));
    }

    #[test]
    fn resolver_rejects_path_outside_root() {
        let resolver = LocalUriResolver::new("/storage", ["org.example.provider"]);
        let err = resolver
            .resolve(Path::new("/tmp/a.jpg"), "org.example.provider")
            .unwrap_err();
        assert!(matches!(err, ResolveError::InvalidArgument(_)));
    }

    #[test]
    fn resolver_rejects_parent_components() {
        let resolver = LocalUriResolver::new("/storage", ["org.example.provider"]);
        for path in ["/storage/DCIM/../wp-1.jpg", "/storage/DCIM/Camera/../../x-1.jpg"] {
            let err = resolver
                .resolve(Path::new(path), "org.example.provider")
                .unwrap_err();
            assert!(matches!(err, ResolveError::InvalidArgument(_)), "{path}");
        }
    }

    #[test]
    fn relative_root_is_made_absolute() {
        let storage = FsStorage::new("storage", "DCIM");
        let media_dir = storage.public_media_dir();
        assert!(media_dir.is_absolute());
        assert!(media_dir.ends_with("storage/DCIM"));

        let resolver = LocalUriResolver::new("storage", ["org.example.provider"]);
        let url = resolver
            .resolve(&media_dir.join("wp-1.jpg"), "org.example.provider")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "content://org.example.provider/external/DCIM/wp-1.jpg"
        );
    }

    #[test]
    fn system_clock_is_after_2020() {
        assert!(SystemClock.now_millis() > 1_577_836_800_000);
    }
}

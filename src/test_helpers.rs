//! Recording collaborators for unit tests.
//!
//! Each mock pushes a [`RecordedOp`] onto a shared log so tests can assert
//! both *what* was called and *that nothing else* was:
//!
//! ```rust
//! let log = OpLog::default();
//! let storage = MockStorage::unmounted(&log);
//! // ... run the builder ...
//! assert_eq!(log.ops(), vec![RecordedOp::IsMounted]);
//! ```

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use url::Url;

use crate::classify::Icon;
use crate::launch::{LaunchRequest, RequestCode};
use crate::platform::{
    Clock, DeviceInfo, ExternalStorage, ImageLoader, Launcher, MediaScanner, ResolveError,
    ScanCompleted, SessionGuard, ThumbnailView, UriResolver,
};

pub const TEST_MEDIA_DIR: &str = "/storage/emulated/0/DCIM";
pub const TEST_MILLIS: i64 = 1_700_000_000_123;

#[derive(Debug, Clone, PartialEq)]
pub enum RecordedOp {
    IsMounted,
    EnsureDir(PathBuf),
    Resolve { path: PathBuf, authority: String },
    ExtendTimeout,
    Start { code: RequestCode },
    ScanFile(PathBuf),
    Load(String),
}

/// Shared, ordered log of collaborator calls.
#[derive(Default)]
pub struct OpLog(Mutex<Vec<RecordedOp>>);

impl OpLog {
    pub fn push(&self, op: RecordedOp) {
        self.0.lock().unwrap().push(op);
    }

    pub fn ops(&self) -> Vec<RecordedOp> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&RecordedOp) -> bool) -> usize {
        self.0.lock().unwrap().iter().filter(|op| pred(op)).count()
    }
}

// =========================================================================
// Builder collaborators
// =========================================================================

pub struct MockStorage<'a> {
    log: &'a OpLog,
    mounted: bool,
    dir_fails: bool,
}

impl<'a> MockStorage<'a> {
    pub fn mounted(log: &'a OpLog) -> Self {
        Self {
            log,
            mounted: true,
            dir_fails: false,
        }
    }

    pub fn unmounted(log: &'a OpLog) -> Self {
        Self {
            log,
            mounted: false,
            dir_fails: false,
        }
    }

    pub fn read_only(log: &'a OpLog) -> Self {
        Self {
            log,
            mounted: true,
            dir_fails: true,
        }
    }
}

impl ExternalStorage for MockStorage<'_> {
    fn is_mounted(&self) -> bool {
        self.log.push(RecordedOp::IsMounted);
        self.mounted
    }

    fn public_media_dir(&self) -> PathBuf {
        PathBuf::from(TEST_MEDIA_DIR)
    }

    fn ensure_dir(&self, dir: &Path) -> io::Result<()> {
        self.log.push(RecordedOp::EnsureDir(dir.to_path_buf()));
        if self.dir_fails {
            Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "read-only file system",
            ))
        } else {
            Ok(())
        }
    }
}

pub struct MockResolver<'a> {
    log: &'a OpLog,
    failure: Option<ResolveError>,
}

impl<'a> MockResolver<'a> {
    pub fn ok(log: &'a OpLog) -> Self {
        Self { log, failure: None }
    }

    pub fn failing(log: &'a OpLog, failure: ResolveError) -> Self {
        Self {
            log,
            failure: Some(failure),
        }
    }
}

impl UriResolver for MockResolver<'_> {
    fn resolve(&self, path: &Path, authority: &str) -> Result<Url, ResolveError> {
        self.log.push(RecordedOp::Resolve {
            path: path.to_path_buf(),
            authority: authority.to_string(),
        });
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(Url::parse(&format!("content://{authority}/external/{name}")).unwrap())
    }
}

pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

pub struct MockDevice(pub bool);

impl DeviceInfo for MockDevice {
    fn has_camera(&self) -> bool {
        self.0
    }
}

// =========================================================================
// Dispatch collaborators
// =========================================================================

pub struct MockGuard<'a>(pub &'a OpLog);

impl SessionGuard for MockGuard<'_> {
    fn extend_timeout(&self) {
        self.0.push(RecordedOp::ExtendTimeout);
    }
}

pub struct MockLauncher<'a> {
    log: &'a OpLog,
    pub started: Mutex<Vec<(LaunchRequest, RequestCode)>>,
}

impl<'a> MockLauncher<'a> {
    pub fn new(log: &'a OpLog) -> Self {
        Self {
            log,
            started: Mutex::new(Vec::new()),
        }
    }

    pub fn started(&self) -> Vec<(LaunchRequest, RequestCode)> {
        self.started.lock().unwrap().clone()
    }
}

impl Launcher for MockLauncher<'_> {
    fn start_for_result(&self, request: &LaunchRequest, code: RequestCode) {
        self.log.push(RecordedOp::Start { code });
        self.started.lock().unwrap().push((request.clone(), code));
    }
}

/// Scanner that completes synchronously with a fixed URI.
pub struct MockScanner<'a>(pub &'a OpLog);

impl MediaScanner for MockScanner<'_> {
    fn scan_file(&self, path: &Path, on_complete: ScanCompleted) {
        self.0.push(RecordedOp::ScanFile(path.to_path_buf()));
        let uri = Url::parse("content://media/external/images/media/7").unwrap();
        on_complete(path, Some(&uri));
    }
}

// =========================================================================
// Presentation collaborators
// =========================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum ViewOp {
    Image(Option<Icon>),
    Default(Icon),
    Error(Icon),
    Tag(String),
}

#[derive(Default)]
pub struct MockView {
    pub ops: Vec<ViewOp>,
}

impl ThumbnailView for MockView {
    fn set_image(&mut self, icon: Option<Icon>) {
        self.ops.push(ViewOp::Image(icon));
    }

    fn set_default_image(&mut self, icon: Icon) {
        self.ops.push(ViewOp::Default(icon));
    }

    fn set_error_image(&mut self, icon: Icon) {
        self.ops.push(ViewOp::Error(icon));
    }

    fn set_tag(&mut self, tag: &str) {
        self.ops.push(ViewOp::Tag(tag.to_string()));
    }
}

/// Loader that records the URL but never fetches.
pub struct MockLoader<'a>(pub &'a OpLog);

impl ImageLoader for MockLoader<'_> {
    fn load(&self, url: &str, _view: &mut dyn ThumbnailView) {
        self.0.push(RecordedOp::Load(url.to_string()));
    }
}

//! Capture-request builder.
//!
//! Turns "get me a photo/video" into a ready-to-dispatch [`CaptureRequest`].
//! Gallery requests are pure data and always succeed. Camera requests need
//! plumbing first:
//!
//! ```text
//! storage mounted?   ── no ──▶ StorageUnavailable
//!        │
//! <media_dir>/Camera/wp-<epoch-millis>.jpg
//!        │
//! parent dir exists? ── create fails ──▶ DirectoryUnavailable
//!        │
//! resolve content URI for "<owner_id>.provider"
//!        │           ── invalid argument / no provider ──▶ ProviderUnavailable
//!        ▼
//! image_capture request, output = content URI, destination = path
//! ```
//!
//! Each step runs only if the previous one succeeded, so an unmounted
//! storage never touches the filesystem and a directory failure never
//! reaches the resolver.
//!
//! ## Pick or capture
//!
//! [`prepare_pick_or_capture_request`] builds the gallery chooser and, when
//! the device has a camera, tries to embed a camera request as an extra
//! initial choice. Any camera-side failure is dropped without a trace and
//! the gallery-only request is returned.
//!
//! ## Dispatch
//!
//! [`Dispatcher`] pairs a [`Launcher`] with a [`SessionGuard`]: the guard is
//! notified right before every request that hands control to an external
//! app, and nothing is dispatched when preparation fails.

use crate::config::{CaptureConfig, provider_authority};
use crate::launch::{
    Action, CAPTURE_OR_PICK_PHOTO_TITLE, CaptureKind, LaunchRequest, MediaClass, MimeFilter,
    PICK_PHOTO_TITLE, PICK_VIDEO_TITLE,
};
use crate::platform::{
    Clock, DeviceInfo, ExternalStorage, Launcher, MediaScanner, ResolveError, SessionGuard,
    UriResolver,
};
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error};
use url::Url;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("external storage is not mounted")]
    StorageUnavailable,
    #[error("path to file could not be created: {}", .path.display())]
    DirectoryUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot access the file planned to store the new media (authority {authority})")]
    ProviderUnavailable {
        authority: String,
        #[source]
        source: ResolveError,
    },
}

impl CaptureError {
    /// Only missing storage can be fixed by the user (insert or mount it).
    pub fn is_user_recoverable(&self) -> bool {
        matches!(self, CaptureError::StorageUnavailable)
    }
}

/// A prepared acquisition, owned by the caller once returned.
///
/// `destination_path` and `granted_uri` are set only when a camera app will
/// write a photo to a pre-allocated file; the caller keeps the path to pick
/// up the result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaptureRequest {
    pub kind: CaptureKind,
    pub launch: LaunchRequest,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub granted_uri: Option<Url>,
}

/// Collaborators needed to prepare camera requests.
pub struct CaptureEnv<'a> {
    pub storage: &'a dyn ExternalStorage,
    pub resolver: &'a dyn UriResolver,
    pub clock: &'a dyn Clock,
    pub device: &'a dyn DeviceInfo,
    pub config: &'a CaptureConfig,
}

/// Content-selection chooser filtered to photos or videos.
pub fn prepare_gallery_request(class: MediaClass) -> CaptureRequest {
    let (kind, title) = match class {
        MediaClass::Photo => (CaptureKind::PhotoFromGallery, PICK_PHOTO_TITLE),
        MediaClass::Video => (CaptureKind::VideoFromGallery, PICK_VIDEO_TITLE),
    };
    let launch = LaunchRequest::new(Action::GetContent)
        .with_mime_filter(class.mime_filter())
        .in_chooser(title);
    CaptureRequest {
        kind,
        launch,
        destination_path: None,
        granted_uri: None,
    }
}

/// Video recording in the camera app's own storage; nothing to pre-allocate.
pub fn prepare_video_camera_request() -> CaptureRequest {
    CaptureRequest {
        kind: CaptureKind::VideoFromCamera,
        launch: LaunchRequest::new(Action::VideoCapture),
        destination_path: None,
        granted_uri: None,
    }
}

/// Prepare a photo capture into a fresh, shareable destination.
pub fn prepare_camera_request(
    env: &CaptureEnv<'_>,
    owner_id: &str,
) -> Result<CaptureRequest, CaptureError> {
    if !env.storage.is_mounted() {
        return Err(CaptureError::StorageUnavailable);
    }
    let (launch, path, uri) = camera_launch(env, owner_id)?;
    Ok(CaptureRequest {
        kind: CaptureKind::PhotoFromCamera,
        launch,
        destination_path: Some(path),
        granted_uri: Some(uri),
    })
}

/// Gallery chooser with the camera offered as an extra choice when possible.
///
/// Never fails: without a camera, or when the camera request cannot be
/// prepared, the plain gallery chooser is returned.
pub fn prepare_pick_or_capture_request(env: &CaptureEnv<'_>, owner_id: &str) -> CaptureRequest {
    let mut request = CaptureRequest {
        kind: CaptureKind::PhotoPickerOrCamera,
        launch: LaunchRequest::new(Action::Pick)
            .with_mime_filter(MimeFilter::Images)
            .in_chooser(CAPTURE_OR_PICK_PHOTO_TITLE),
        destination_path: None,
        granted_uri: None,
    };

    if env.device.has_camera() {
        if let Ok((camera, path, uri)) = camera_launch(env, owner_id) {
            request.launch = request.launch.with_initial_choice(camera);
            request.destination_path = Some(path);
            request.granted_uri = Some(uri);
        }
    }

    request
}

/// `<media_dir>/<camera_subdir>/<prefix><millis>.<ext>`
pub fn capture_destination(
    storage: &dyn ExternalStorage,
    clock: &dyn Clock,
    config: &CaptureConfig,
) -> PathBuf {
    let file_name = format!(
        "{}{}.{}",
        config.file_prefix,
        clock.now_millis(),
        config.file_extension
    );
    storage
        .public_media_dir()
        .join(&config.camera_subdir)
        .join(file_name)
}

/// Allocate the destination, make sure its directory exists, and share it.
fn camera_launch(
    env: &CaptureEnv<'_>,
    owner_id: &str,
) -> Result<(LaunchRequest, PathBuf, Url), CaptureError> {
    let path = capture_destination(env.storage, env.clock, env.config);

    let dir = path.parent().unwrap_or(Path::new(""));
    env.storage.ensure_dir(dir).map_err(|source| {
        error!(path = %path.display(), %source, "path to file could not be created");
        CaptureError::DirectoryUnavailable {
            path: path.clone(),
            source,
        }
    })?;

    let authority = provider_authority(owner_id);
    let uri = env.resolver.resolve(&path, &authority).map_err(|source| {
        match &source {
            ResolveError::InvalidArgument(_) => {
                error!(%source, "cannot access the file planned to store the new media")
            }
            ResolveError::NoProvider(_) => error!(
                %authority,
                "cannot access the file planned to store the new media: no valid provider for the authority"
            ),
        }
        CaptureError::ProviderUnavailable {
            authority: authority.clone(),
            source,
        }
    })?;

    debug!(path = %path.display(), %uri, "media capture path ready");
    let launch = LaunchRequest::new(Action::ImageCapture).with_output(uri.clone());
    Ok((launch, path, uri))
}

/// Dispatches prepared requests, extending the session lock first.
pub struct Dispatcher<'a> {
    pub launcher: &'a dyn Launcher,
    pub guard: &'a dyn SessionGuard,
}

impl Dispatcher<'_> {
    pub fn dispatch(&self, request: &CaptureRequest) {
        self.guard.extend_timeout();
        self.launcher
            .start_for_result(&request.launch, request.kind.request_code());
    }

    pub fn launch_photo_library(&self) -> CaptureRequest {
        let request = prepare_gallery_request(MediaClass::Photo);
        self.dispatch(&request);
        request
    }

    pub fn launch_video_library(&self) -> CaptureRequest {
        let request = prepare_gallery_request(MediaClass::Video);
        self.dispatch(&request);
        request
    }

    pub fn launch_video_camera(&self) -> CaptureRequest {
        let request = prepare_video_camera_request();
        self.dispatch(&request);
        request
    }

    /// Nothing is dispatched, and the guard is left alone, on failure.
    pub fn launch_camera(
        &self,
        env: &CaptureEnv<'_>,
        owner_id: &str,
    ) -> Result<CaptureRequest, CaptureError> {
        let request = prepare_camera_request(env, owner_id)?;
        self.dispatch(&request);
        Ok(request)
    }

    pub fn launch_pick_or_capture(&self, env: &CaptureEnv<'_>, owner_id: &str) -> CaptureRequest {
        let request = prepare_pick_or_capture_request(env, owner_id);
        self.dispatch(&request);
        request
    }
}

/// Hand a new local file to the media index so galleries pick it up.
///
/// Fire-and-forget: returns as soon as the scan is queued; completion is
/// only logged.
pub fn scan_media_file(scanner: &impl MediaScanner, local_path: &Path) {
    scanner.scan_file(
        local_path,
        Box::new(|path: &Path, uri: Option<&Url>| {
            debug!(
                path = %path.display(),
                uri = uri.map(Url::as_str).unwrap_or(""),
                "media scanner finished scanning"
            );
        }),
    );
}

//! Platform-neutral launch descriptors.
//!
//! A [`LaunchRequest`] says *what* external application or chooser the host
//! should open (action, MIME filter, output target, chooser title, extra
//! initial choices). It says nothing about *how* the host dispatches it; that
//! is the [`Launcher`](crate::platform::Launcher)'s job.
//!
//! ## Shapes produced by the builder
//!
//! ```text
//! Photo library     chooser "Pick photo"            get_content  image/*
//! Video library     chooser "Pick video"            get_content  video/*
//! Photo camera      image_capture  output=content://<owner>.provider/...
//! Video camera      video_capture
//! Pick or capture   chooser "Capture or pick photo" pick  image/*
//!                     └── initial: image_capture output=content://...
//! ```
//!
//! Each acquisition kind carries its own [`RequestCode`] so the completion
//! callback can be routed back to the right handler.

use serde::Serialize;
use std::fmt;
use url::Url;

pub const PICK_PHOTO_TITLE: &str = "Pick photo";
pub const PICK_VIDEO_TITLE: &str = "Pick video";
pub const CAPTURE_OR_PICK_PHOTO_TITLE: &str = "Capture or pick photo";

/// What the external application is asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Open the content-selection UI and return whatever the user picks.
    GetContent,
    /// Pick an item from a media collection.
    Pick,
    /// Take a still photo, writing it to the request's output target.
    ImageCapture,
    /// Record a video.
    VideoCapture,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::GetContent => "get_content",
            Action::Pick => "pick",
            Action::ImageCapture => "image_capture",
            Action::VideoCapture => "video_capture",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// MIME class a content-selection UI is filtered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MimeFilter {
    #[serde(rename = "image/*")]
    Images,
    #[serde(rename = "video/*")]
    Videos,
}

impl MimeFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            MimeFilter::Images => "image/*",
            MimeFilter::Videos => "video/*",
        }
    }
}

impl fmt::Display for MimeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Photo or video, for the gallery flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaClass {
    Photo,
    Video,
}

impl MediaClass {
    pub fn mime_filter(self) -> MimeFilter {
        match self {
            MediaClass::Photo => MimeFilter::Images,
            MediaClass::Video => MimeFilter::Videos,
        }
    }
}

/// The five ways a caller can ask for media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureKind {
    PhotoFromCamera,
    PhotoFromGallery,
    VideoFromCamera,
    VideoFromGallery,
    PhotoPickerOrCamera,
}

impl CaptureKind {
    pub fn request_code(self) -> RequestCode {
        match self {
            CaptureKind::PhotoFromCamera => RequestCode::TakePhoto,
            CaptureKind::PhotoFromGallery => RequestCode::PictureLibrary,
            CaptureKind::VideoFromCamera => RequestCode::TakeVideo,
            CaptureKind::VideoFromGallery => RequestCode::VideoLibrary,
            CaptureKind::PhotoPickerOrCamera => RequestCode::PickOrCapturePhoto,
        }
    }
}

/// Correlation code attached to a dispatched request, distinct per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestCode {
    PictureLibrary,
    TakePhoto,
    VideoLibrary,
    TakeVideo,
    PickOrCapturePhoto,
}

impl RequestCode {
    pub fn code(self) -> u32 {
        match self {
            RequestCode::PictureLibrary => 2000,
            RequestCode::TakePhoto => 2100,
            RequestCode::VideoLibrary => 2200,
            RequestCode::TakeVideo => 2300,
            RequestCode::PickOrCapturePhoto => 2400,
        }
    }
}

/// Immutable description of an external launch.
///
/// Built with the consuming `with_*` methods; once handed to the caller it is
/// never changed by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchRequest {
    pub action: Action,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_filter: Option<MimeFilter>,
    /// Capability URI the external app writes its result to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<Url>,
    /// Present when the request is shown through a chooser.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chooser_title: Option<String>,
    /// Extra choices offered next to the chooser's own targets.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub initial_choices: Vec<LaunchRequest>,
}

impl LaunchRequest {
    pub fn new(action: Action) -> Self {
        Self {
            action,
            mime_filter: None,
            output: None,
            chooser_title: None,
            initial_choices: Vec::new(),
        }
    }

    pub fn with_mime_filter(mut self, filter: MimeFilter) -> Self {
        self.mime_filter = Some(filter);
        self
    }

    pub fn with_output(mut self, output: Url) -> Self {
        self.output = Some(output);
        self
    }

    /// Wrap the request in a chooser with the given title.
    pub fn in_chooser(mut self, title: impl Into<String>) -> Self {
        self.chooser_title = Some(title.into());
        self
    }

    pub fn with_initial_choice(mut self, choice: LaunchRequest) -> Self {
        self.initial_choices.push(choice);
        self
    }
}

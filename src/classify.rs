//! Media classification by file extension.
//!
//! Every function here is pure: the input is a URL or a filesystem path,
//! and nothing is fetched or stat'ed. The extension is the text after the
//! last `.` of the final path segment, ignoring any `?query` or `#fragment`,
//! compared ASCII case-insensitively:
//!
//! ```text
//! https://x.com/up/IMG_0001.JPG?w=300   →  jpg   →  Image
//! /sdcard/DCIM/Camera/wp-1700000000.jpg →  jpg   →  Image
//! report.PDF                            →  pdf   →  Document
//! https://x.com/v/clip                  →  (none) → Unknown
//! ```

use serde::Serialize;
use std::fmt;

/// Coarse media classification used for presentation decisions only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Document,
    Slideshow,
    Spreadsheet,
    Video,
    Audio,
    Unknown,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MediaKind::Image => "image",
            MediaKind::Document => "document",
            MediaKind::Slideshow => "slideshow",
            MediaKind::Spreadsheet => "spreadsheet",
            MediaKind::Video => "video",
            MediaKind::Audio => "audio",
            MediaKind::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Icon shown in place of (or while loading) a thumbnail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    Image,
    Page,
    Slideshow,
    Spreadsheet,
    VideoCamera,
    Audio,
    /// Neutral tile background, used as loading and error image.
    MediaItemBackground,
}

impl Icon {
    pub fn as_str(self) -> &'static str {
        match self {
            Icon::Image => "image",
            Icon::Page => "page",
            Icon::Slideshow => "slideshow",
            Icon::Spreadsheet => "spreadsheet",
            Icon::VideoCamera => "video_camera",
            Icon::Audio => "audio",
            Icon::MediaItemBackground => "media_item_background",
        }
    }
}

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp"];
const DOCUMENT_EXTENSIONS: &[&str] = &["doc", "docx", "odt", "pdf", "txt", "rtf"];
const SLIDESHOW_EXTENSIONS: &[&str] = &["ppt", "pptx", "pps", "ppsx", "key", "odp"];
const SPREADSHEET_EXTENSIONS: &[&str] = &["xls", "xlsx", "ods", "csv"];
const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "m4v", "mov", "wmv", "avi", "mpg", "mpeg", "ogv", "3gp", "3g2", "mkv", "webm",
];
const AUDIO_EXTENSIONS: &[&str] = &[
    "mp3", "m4a", "wav", "ogg", "oga", "aac", "flac", "aiff", "aif", "wma",
];

const KIND_TABLE: &[(MediaKind, &[&str])] = &[
    (MediaKind::Image, IMAGE_EXTENSIONS),
    (MediaKind::Document, DOCUMENT_EXTENSIONS),
    (MediaKind::Slideshow, SLIDESHOW_EXTENSIONS),
    (MediaKind::Spreadsheet, SPREADSHEET_EXTENSIONS),
    (MediaKind::Video, VIDEO_EXTENSIONS),
    (MediaKind::Audio, AUDIO_EXTENSIONS),
];

/// Extract the extension of the final path segment, as written.
///
/// Returns `None` when the last segment has no `.` or ends with one.
pub fn file_extension(url: &str) -> Option<&str> {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    let path = &url[..end];
    let segment = path.rsplit('/').next().unwrap_or(path);
    let (_, ext) = segment.rsplit_once('.')?;
    if ext.is_empty() { None } else { Some(ext) }
}

/// Classify a URL or path. Total: anything unrecognised is [`MediaKind::Unknown`].
pub fn classify(url: &str) -> MediaKind {
    let Some(ext) = file_extension(url) else {
        return MediaKind::Unknown;
    };
    KIND_TABLE
        .iter()
        .find(|(_, exts)| exts.iter().any(|e| e.eq_ignore_ascii_case(ext)))
        .map(|(kind, _)| *kind)
        .unwrap_or(MediaKind::Unknown)
}

pub fn is_image_url(url: &str) -> bool {
    classify(url) == MediaKind::Image
}

/// Placeholder icon for a kind. `Unknown` has none; the caller supplies its own.
pub fn placeholder_for(kind: MediaKind) -> Option<Icon> {
    match kind {
        MediaKind::Image => Some(Icon::Image),
        MediaKind::Document => Some(Icon::Page),
        MediaKind::Slideshow => Some(Icon::Slideshow),
        MediaKind::Spreadsheet => Some(Icon::Spreadsheet),
        MediaKind::Video => Some(Icon::VideoCamera),
        MediaKind::Audio => Some(Icon::Audio),
        MediaKind::Unknown => None,
    }
}

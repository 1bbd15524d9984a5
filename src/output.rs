//! CLI output formatting.
//!
//! Each command has a `format_*` function returning lines (pure, testable)
//! and a `print_*` wrapper that writes them to stdout.
//!
//! ```text
//! photo_from_camera → code 2100
//!     image_capture
//!         Output: content://org.wordpress.android.provider/external/DCIM/Camera/wp-1.jpg
//!     Destination: /storage/emulated/0/DCIM/Camera/wp-1.jpg
//!
//! photo_picker_or_camera → code 2400
//!     chooser "Capture or pick photo": pick image/*
//!         image_capture
//!             Output: content://...
//! ```

use crate::capture::CaptureRequest;
use crate::classify::{MediaKind, placeholder_for};
use crate::launch::{CaptureKind, LaunchRequest};

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn kind_name(kind: CaptureKind) -> &'static str {
    match kind {
        CaptureKind::PhotoFromCamera => "photo_from_camera",
        CaptureKind::PhotoFromGallery => "photo_from_gallery",
        CaptureKind::VideoFromCamera => "video_from_camera",
        CaptureKind::VideoFromGallery => "video_from_gallery",
        CaptureKind::PhotoPickerOrCamera => "photo_picker_or_camera",
    }
}

/// One line for the request itself, then its output and embedded choices.
fn launch_lines(launch: &LaunchRequest, depth: usize, lines: &mut Vec<String>) {
    let target = match launch.mime_filter {
        Some(filter) => format!("{} {}", launch.action, filter),
        None => launch.action.to_string(),
    };
    let header = match &launch.chooser_title {
        Some(title) => format!("chooser \"{title}\": {target}"),
        None => target,
    };
    lines.push(format!("{}{}", indent(depth), header));
    if let Some(output) = &launch.output {
        lines.push(format!("{}Output: {}", indent(depth + 1), output));
    }
    for choice in &launch.initial_choices {
        launch_lines(choice, depth + 1, lines);
    }
}

pub fn format_capture_request(request: &CaptureRequest) -> Vec<String> {
    let mut lines = vec![format!(
        "{} → code {}",
        kind_name(request.kind),
        request.kind.request_code().code()
    )];
    launch_lines(&request.launch, 1, &mut lines);
    if let Some(path) = &request.destination_path {
        lines.push(format!("{}Destination: {}", indent(1), path.display()));
    }
    lines
}

pub fn print_capture_request(request: &CaptureRequest) {
    for line in format_capture_request(request) {
        println!("{}", line);
    }
}

/// `url → kind (placeholder)`, placeholder shown as `none` for unknown kinds.
pub fn format_classification(url: &str, kind: MediaKind) -> String {
    let placeholder = placeholder_for(kind).map_or("none", |icon| icon.as_str());
    format!("{url} → {kind} ({placeholder})")
}

pub fn print_classification(url: &str, kind: MediaKind) {
    println!("{}", format_classification(url, kind));
}

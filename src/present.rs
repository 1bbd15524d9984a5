//! Presentation decisions for media items and sites.
//!
//! Pure functions over read-only records and URL strings. The only outward
//! effect is [`render_thumbnail`], which drives a [`ThumbnailView`] and
//! decides whether the [`ImageLoader`] is asked to fetch anything at all:
//! only URLs whose last path segment has an image extension are fetched,
//! so a `.pdf` is never downloaded as if it were a picture.

use crate::classify::{Icon, is_image_url};
use crate::platform::{ImageLoader, ThumbnailView};
use crate::types::{MediaRecord, SiteRecord};
use url::Url;

/// Suffix of the still-image companion of a hosted video.
pub const VIDEO_POSTER_SUFFIX: &str = "_std.original.jpg";

/// Media can be deleted unless it is mid-upload or already deleted.
pub fn can_delete_media(item: &impl MediaRecord) -> bool {
    match item.upload_state() {
        None => true,
        Some(state) => {
            !state.eq_ignore_ascii_case("uploading") && !state.eq_ignore_ascii_case("deleted")
        }
    }
}

/// Self-managed sites have no capability model, so uploads are always allowed.
pub fn can_upload_media(site: &impl SiteRecord) -> bool {
    if site.uses_managed_api() {
        site.has_upload_capability()
    } else {
        true
    }
}

pub fn can_delete_site_media(site: &impl SiteRecord) -> bool {
    can_upload_media(site)
}

/// Poster image URL for a hosted video: the extension is swapped for
/// [`VIDEO_POSTER_SUFFIX`].
///
/// - `https://x.com/v/clip.mp4` → `https://x.com/v/clip_std.original.jpg`
/// - `https://x.com/v/clip.mp4?v=2` → `https://x.com/v/clip_std.original.jpg`
/// - `https://x.com/v/clip` → `""` (no extension)
/// - `None` → `""`
///
/// A query or fragment is dropped before the extension is looked up; it
/// belongs to the video, not the poster. The result is not checked for
/// existence.
pub fn video_poster_url(video_url: Option<&str>) -> String {
    let Some(url) = video_url else {
        return String::new();
    };
    let url = url.split(['?', '#']).next().unwrap_or(url);
    let segment_start = url.rfind('/').map(|i| i + 1).unwrap_or(0);
    match url.rfind('.') {
        Some(dot) if dot > 0 && dot >= segment_start => {
            format!("{}{}", &url[..dot], VIDEO_POSTER_SUFFIX)
        }
        _ => String::new(),
    }
}

/// Render a thumbnail for `url` into `view`.
///
/// - `None` clears the view.
/// - Image URLs get the tile background as loading/error image, are tagged
///   with the URL, and are handed to `loader`.
/// - Anything else shows the tile background and is never fetched.
pub fn render_thumbnail(url: Option<&str>, view: &mut dyn ThumbnailView, loader: &impl ImageLoader) {
    let Some(url) = url else {
        view.set_image(None);
        return;
    };

    view.set_error_image(Icon::MediaItemBackground);
    view.set_default_image(Icon::MediaItemBackground);

    if is_image_url(&last_path_segment(url)) {
        view.set_tag(url);
        loader.load(url, view);
    } else {
        view.set_image(Some(Icon::MediaItemBackground));
    }
}

/// Last path segment of a URL; local paths and unparsable input are
/// returned as-is.
fn last_path_segment(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| {
            u.path_segments()
                .and_then(|mut segments| segments.next_back().map(str::to_string))
        })
        .unwrap_or_else(|| url.to_string())
}

/// Fling distance above which thumbnail loading is paused while scrolling.
pub fn fling_distance_to_disable_thumb_loading(max_fling_velocity: u32) -> u32 {
    max_fling_velocity / 2
}

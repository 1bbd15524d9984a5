use clap::{Parser, Subcommand};
use media_capture::capture::{
    self, CaptureEnv, CaptureError, CaptureRequest, prepare_camera_request,
    prepare_gallery_request, prepare_pick_or_capture_request, prepare_video_camera_request,
};
use media_capture::classify::{Icon, classify};
use media_capture::launch::MediaClass;
use media_capture::platform::{
    FixedDevice, FsStorage, ImageLoader, LocalUriResolver, MediaScanner, ScanCompleted,
    SystemClock, ThumbnailView,
};
use media_capture::types::{MediaItem, Site};
use media_capture::{config, output, present};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "media-capture")]
#[command(version)]
#[command(about = "Prepare camera/gallery requests and classify media")]
#[command(long_about = "\
Prepare camera/gallery requests and classify media

Camera captures go to <storage-root>/<media_dir>/<camera_subdir>/wp-<millis>.jpg
and are shared as content://<owner_id>.provider/external/... . The storage
root counts as mounted while it exists.

Run 'media-capture gen-config' to print a documented media-capture.toml.")]
struct Cli {
    /// Directory holding media-capture.toml
    #[arg(long, default_value = ".", global = true)]
    config: PathBuf,

    /// Root of the external storage volume
    #[arg(long, default_value = "storage", global = true)]
    storage_root: PathBuf,

    /// Owner id whose capability authority captures are shared under (overrides config)
    #[arg(long, global = true)]
    owner_id: Option<String>,

    /// Print requests as JSON instead of a summary
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify URLs or paths by extension
    Classify { urls: Vec<String> },
    /// Derive the poster image URL of a hosted video
    Poster { url: String },
    /// Decide how a thumbnail would be rendered
    Thumbnail { url: Option<String> },
    /// Content-selection request for photos (or videos)
    Gallery {
        #[arg(long)]
        video: bool,
    },
    /// Photo capture into a freshly allocated destination
    Camera,
    /// Video capture request
    VideoCamera,
    /// Gallery chooser with the camera as an extra choice
    PickOrCapture {
        /// Behave as a device without a camera
        #[arg(long)]
        no_camera: bool,
    },
    /// Whether a media item in the given upload state may be deleted
    CanDelete {
        #[arg(long)]
        state: Option<String>,
    },
    /// Whether media may be uploaded to a site
    CanUpload {
        /// Site is backed by the managed API
        #[arg(long)]
        managed: bool,
        /// Site record carries the upload capability
        #[arg(long)]
        upload_capability: bool,
    },
    /// Fling distance above which thumbnail loading is paused
    FlingThreshold,
    /// Queue a local file for media indexing
    Scan { path: PathBuf },
    /// Print a stock media-capture.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Command::Classify { urls } => {
            for url in urls {
                output::print_classification(url, classify(url));
            }
        }
        Command::Poster { url } => {
            println!("{}", present::video_poster_url(Some(url)));
        }
        Command::Thumbnail { url } => {
            let mut view = StdoutView;
            present::render_thumbnail(url.as_deref(), &mut view, &StdoutLoader);
        }
        Command::Gallery { video } => {
            let class = if *video {
                MediaClass::Video
            } else {
                MediaClass::Photo
            };
            emit(&cli, &prepare_gallery_request(class))?;
        }
        Command::Camera => {
            let config = load_config(&cli)?;
            let (storage, resolver) = local_platform(&cli.storage_root, &config);
            let env = CaptureEnv {
                storage: &storage,
                resolver: &resolver,
                clock: &SystemClock,
                device: &FixedDevice { camera: true },
                config: &config,
            };
            match prepare_camera_request(&env, &config.owner_id) {
                Ok(request) => emit(&cli, &request)?,
                Err(err @ CaptureError::StorageUnavailable) => {
                    eprintln!(
                        "External storage required: mount {} and try again",
                        cli.storage_root.display()
                    );
                    return Err(err.into());
                }
                Err(err) => return Err(err.into()),
            }
        }
        Command::VideoCamera => emit(&cli, &prepare_video_camera_request())?,
        Command::PickOrCapture { no_camera } => {
            let config = load_config(&cli)?;
            let (storage, resolver) = local_platform(&cli.storage_root, &config);
            let env = CaptureEnv {
                storage: &storage,
                resolver: &resolver,
                clock: &SystemClock,
                device: &FixedDevice { camera: !no_camera },
                config: &config,
            };
            emit(&cli, &prepare_pick_or_capture_request(&env, &config.owner_id))?;
        }
        Command::CanDelete { state } => {
            let item = MediaItem {
                url: String::new(),
                upload_state: state.clone(),
            };
            println!("{}", present::can_delete_media(&item));
        }
        Command::CanUpload {
            managed,
            upload_capability,
        } => {
            let site = Site {
                uses_managed_api: *managed,
                has_upload_capability: *upload_capability,
            };
            println!("{}", present::can_upload_media(&site));
        }
        Command::FlingThreshold => {
            let config = load_config(&cli)?;
            println!(
                "{}",
                present::fling_distance_to_disable_thumb_loading(config.max_fling_velocity)
            );
        }
        Command::Scan { path } => {
            capture::scan_media_file(&LocalScanner, path);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<config::CaptureConfig, config::ConfigError> {
    let overrides = config::ConfigOverrides {
        owner_id: cli.owner_id.clone(),
    };
    config::load_config(&cli.config, &overrides)
}

fn emit(cli: &Cli, request: &CaptureRequest) -> Result<(), serde_json::Error> {
    if cli.json {
        println!("{}", serde_json::to_string_pretty(request)?);
    } else {
        output::print_capture_request(request);
    }
    Ok(())
}

/// Storage and resolver over a local directory; only the configured
/// authority is registered. Both take the root as an absolute path.
fn local_platform(root: &Path, config: &config::CaptureConfig) -> (FsStorage, LocalUriResolver) {
    let storage = FsStorage::new(root, config.media_dir.clone());
    let resolver = LocalUriResolver::new(root, [config.provider_authority()]);
    (storage, resolver)
}

/// Prints what a real view would be asked to show.
struct StdoutView;

impl ThumbnailView for StdoutView {
    fn set_image(&mut self, icon: Option<Icon>) {
        println!("image: {}", icon.map_or("none", Icon::as_str));
    }

    fn set_default_image(&mut self, icon: Icon) {
        println!("default image: {}", icon.as_str());
    }

    fn set_error_image(&mut self, icon: Icon) {
        println!("error image: {}", icon.as_str());
    }

    fn set_tag(&mut self, tag: &str) {
        println!("tag: {tag}");
    }
}

struct StdoutLoader;

impl ImageLoader for StdoutLoader {
    fn load(&self, url: &str, _view: &mut dyn ThumbnailView) {
        println!("load: {url}");
    }
}

/// There is no media index on a plain filesystem; the file is reported as
/// scanned right away.
struct LocalScanner;

impl MediaScanner for LocalScanner {
    fn scan_file(&self, path: &Path, on_complete: ScanCompleted) {
        on_complete(path, None);
    }
}

//! Video Source Seam
//!
//! [`FrameSource`] abstracts a live, continuously-updating image stream with
//! known pixel dimensions, an end-of-stream signal, and an explicit release
//! operation. [`AcquireSource`] models the acquisition prompt: the user may
//! decline, which is a non-error condition ([`Acquisition::Cancelled`]).
//!
//! Platform display capture lives behind these traits as an external
//! collaborator. The shipped [`ImageDirSource`] plays back a directory of
//! still images in sorted order, ending itself when the files run out.

use image::RgbaImage;
use std::future::Future;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A live video source that the sampler can pull stills from.
pub trait FrameSource {
    /// Pixel dimensions, or `None` while the source is still initializing.
    fn dimensions(&self) -> Option<(u32, u32)>;

    /// Capture the source's current visual content. Intermediate frames
    /// between samples are never buffered.
    fn capture(&mut self) -> crate::Result<RgbaImage>;

    /// Whether the source has ended itself (e.g. the shared window closed).
    fn has_ended(&self) -> bool;

    /// Release the underlying resources. Must be called on every exit path
    /// when recording ends.
    fn release(&mut self);
}

/// Outcome of requesting a video source
pub enum Acquisition<S> {
    /// The source was granted and is live
    Granted(S),
    /// The user declined or cancelled the grant; not an error
    Cancelled,
}

/// Asynchronous acquisition of a video source (the grant prompt is the first
/// of the two suspension points in the capture flow).
pub trait AcquireSource {
    /// The concrete source type this provider grants
    type Source: FrameSource;

    /// Request the source. `Ok(Cancelled)` means the user declined.
    fn acquire(&self) -> impl Future<Output = crate::Result<Acquisition<Self::Source>>> + Send;
}

/// Image file extensions recognized as playable frames
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Plays back a directory of still images, in sorted filename order, as a
/// video source. The source ends itself once every image has been captured.
pub struct ImageDirSource {
    paths: Vec<PathBuf>,
    cursor: usize,
    dimensions: (u32, u32),
    released: bool,
}

impl ImageDirSource {
    /// Create a provider that acquires a source over the given directory.
    pub fn provider(dir: impl AsRef<Path>) -> ImageDirProvider {
        ImageDirProvider {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn open(dir: &Path) -> crate::Result<Self> {
        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| {
                p.extension()
                    .and_then(|e| e.to_str())
                    .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
                    .unwrap_or(false)
            })
            .collect();
        paths.sort();

        if paths.is_empty() {
            return Err(crate::Error::Acquisition(format!(
                "no image files in {}",
                dir.display()
            )));
        }

        // Probe the first image so dimensions are known up front
        let first = image::open(&paths[0])
            .map_err(|e| crate::Error::Acquisition(format!("unreadable first frame: {}", e)))?;

        Ok(Self {
            dimensions: (first.width(), first.height()),
            paths,
            cursor: 0,
            released: false,
        })
    }
}

impl FrameSource for ImageDirSource {
    fn dimensions(&self) -> Option<(u32, u32)> {
        Some(self.dimensions)
    }

    fn capture(&mut self) -> crate::Result<RgbaImage> {
        if self.released || self.cursor >= self.paths.len() {
            return Err(crate::Error::Capture("source has ended".to_string()));
        }
        let path = &self.paths[self.cursor];
        self.cursor += 1;
        let image = image::open(path)
            .map_err(|e| crate::Error::Capture(format!("{}: {}", path.display(), e)))?;
        Ok(image.to_rgba8())
    }

    fn has_ended(&self) -> bool {
        self.released || self.cursor >= self.paths.len()
    }

    fn release(&mut self) {
        if !self.released {
            debug!(frames_played = self.cursor, "image directory source released");
        }
        self.released = true;
        self.paths.clear();
    }
}

/// Provider for [`ImageDirSource`]
pub struct ImageDirProvider {
    dir: PathBuf,
}

impl AcquireSource for ImageDirProvider {
    type Source = ImageDirSource;

    async fn acquire(&self) -> crate::Result<Acquisition<ImageDirSource>> {
        ImageDirSource::open(&self.dir).map(Acquisition::Granted)
    }
}

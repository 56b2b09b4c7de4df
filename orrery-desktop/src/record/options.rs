//! Options controlling recording.

use std::path::PathBuf;
use std::time::Duration;

use orrery_render::camera::ImageSize;

/// Options for recording and output in [`record_main`](super::record_main).
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
#[expect(clippy::module_name_repetitions)]
pub struct RecordOptions {
    /// File to write. Its extension has already been checked to be `.png` or `.apng`.
    pub output_path: PathBuf,
    #[allow(missing_docs)]
    pub image_size: ImageSize,
    /// If [`None`], a single still image is written.
    pub animation: Option<RecordAnimationOptions>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
#[expect(clippy::module_name_repetitions)]
#[allow(missing_docs)]
pub struct RecordAnimationOptions {
    pub frame_count: usize,
    pub frame_period: Duration,
}

impl RecordOptions {
    #[allow(missing_docs)]
    pub fn new(
        output_path: PathBuf,
        image_size: ImageSize,
        animation: Option<RecordAnimationOptions>,
    ) -> Self {
        Self {
            output_path,
            image_size,
            animation,
        }
    }

    /// Number of images which will be written.
    pub fn frame_count(&self) -> usize {
        self.animation.as_ref().map_or(1, |animation| animation.frame_count)
    }
}

impl RecordAnimationOptions {
    /// One frame per tick of the animation timer, which runs every 50 ms.
    pub fn per_tick(frame_count: usize) -> Self {
        Self {
            frame_count,
            frame_period: Duration::from_millis(50),
        }
    }

    pub(crate) fn total_duration(&self) -> Duration {
        self.frame_period * u32::try_from(self.frame_count).unwrap_or(u32::MAX)
    }
}

//! Components for the `orrery` command-line application, which animates the
//! [`orrery`] scenes without a window and writes the frames to image files or the terminal.
//!
//! This is not a general-purpose library. It exists separately from the binary target so that
//! its pieces can be tested directly.

// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![forbid(unsafe_code)]

use orrery_render::camera::ImageSize;

mod config_files;
pub use config_files::OptionsArgs;
pub mod logging;
pub mod record;
mod session;
pub use session::{SceneChoice, SessionParams, headless_main_loop};
pub mod terminal;

/// Choose an image size when the user did not request one.
///
/// `print` mode gets a size that fits a typical terminal, since each character cell shows
/// one column and two rows of pixels.
pub fn choose_image_size(for_terminal: bool) -> ImageSize {
    if for_terminal {
        ImageSize::new(80, 48)
    } else {
        ImageSize::new(640, 480)
    }
}

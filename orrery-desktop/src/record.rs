//! Headless image and animation output.

use std::fs::File;
use std::io::BufWriter;

use anyhow::Context as _;

use orrery_render::{Flaws, HeadlessRenderer};

mod options;
pub use options::*;
mod write_png;

/// Renders frames from `renderer` and writes them to the file specified by `options`.
///
/// The first frame shows the renderer's state as given; each later frame is preceded by one
/// [`HeadlessRenderer::step()`]. Returns the union of all frames' flaws.
pub fn record_main(
    renderer: &mut dyn HeadlessRenderer,
    options: &RecordOptions,
) -> Result<Flaws, anyhow::Error> {
    if renderer.size() != options.image_size {
        anyhow::bail!(
            "renderer size {renderer_size:?} does not match recording size {record_size:?}",
            renderer_size = renderer.size(),
            record_size = options.image_size,
        );
    }

    let path_str = options.output_path.to_string_lossy();
    let file = File::create(&options.output_path)
        .with_context(|| format!("could not create output file {path_str}"))?;
    let mut buf_writer = BufWriter::new(file);
    let flaws = write_png::write_frames(&mut buf_writer, options, renderer)
        .with_context(|| format!("error while writing {path_str}"))?;
    let file = buf_writer.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()?;

    match &options.animation {
        None => log::info!("Wrote still image to {path_str}"),
        Some(animation) => log::info!(
            "Wrote {count} frames ({duration:.2} s) to {path_str}",
            count = animation.frame_count,
            duration = animation.total_duration().as_secs_f64(),
        ),
    }
    if !flaws.is_empty() {
        log::warn!("Recording has flaws: {flaws}");
    }
    Ok(flaws)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::BufReader;
    use std::path::Path;

    use orrery::content::{self, palette};
    use orrery_render::camera::ImageSize;
    use orrery_render::state::{ClockState, StillLife};
    use pretty_assertions::assert_eq;

    fn read_png_info(path: &Path) -> png::Info<'static> {
        let decoder = png::Decoder::new(BufReader::new(File::open(path).unwrap()));
        let reader = decoder.read_info().unwrap();
        reader.info().clone()
    }

    #[test]
    fn still_image() {
        let dir = tempfile::tempdir().unwrap();
        let size = ImageSize::new(60, 60);
        let options = RecordOptions::new(dir.path().join("snowman.png"), size, None);

        let flaws = record_main(&mut StillLife::new(size, palette::WHITE), &options).unwrap();

        assert_eq!(flaws, Flaws::empty());
        let info = read_png_info(&options.output_path);
        assert_eq!((info.width, info.height), (60, 60));
        assert_eq!(info.color_type, png::ColorType::Rgb);
        assert!(info.animation_control.is_none());
    }

    #[test]
    fn animation() {
        let dir = tempfile::tempdir().unwrap();
        let size = ImageSize::new(40, 30);
        let options = RecordOptions::new(
            dir.path().join("clock.apng"),
            size,
            Some(RecordAnimationOptions::per_tick(5)),
        );
        let mut renderer = ClockState::new(content::clock(40, 30), size, palette::WHITE);

        record_main(&mut renderer, &options).unwrap();

        let info = read_png_info(&options.output_path);
        assert_eq!((info.width, info.height), (40, 30));
        assert_eq!(info.animation_control.map(|ac| ac.num_frames), Some(5));
    }

    #[test]
    fn size_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let options = RecordOptions::new(
            dir.path().join("wrong.png"),
            ImageSize::new(10, 10),
            None,
        );
        let error = record_main(
            &mut StillLife::new(ImageSize::new(60, 60), palette::WHITE),
            &options,
        )
        .unwrap_err();
        assert_eq!(
            error.to_string(),
            "renderer size 60x60 does not match recording size 10x10"
        );
        assert!(!options.output_path.exists());
    }
}

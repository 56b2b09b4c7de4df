use std::io;

use anyhow::Context as _;
use png::{Encoder, chunk::ChunkType};

use orrery_render::{Flaws, HeadlessRenderer};

use crate::record::RecordOptions;

/// Draws the frames `options` asks for from `renderer`, stepping it between frames, and writes
/// them as (A)PNG data.
pub(crate) fn write_frames<W: io::Write>(
    writer: W,
    options: &RecordOptions,
    renderer: &mut dyn HeadlessRenderer,
) -> Result<Flaws, anyhow::Error> {
    let mut png_writer = new_png_writer(writer, options)?;
    let mut flaws = Flaws::empty();
    for frame_number in 0..options.frame_count() {
        if frame_number > 0 {
            renderer.step();
        }
        let rendering = renderer.draw();
        flaws |= rendering.flaws;
        let image = imgref::ImgVec::<[u8; 3]>::from(rendering);
        png_writer
            .write_image_data(image.buf().as_flattened())
            .with_context(|| format!("failed to write frame {frame_number}"))?;
        log::trace!("wrote frame {frame_number}");
    }
    png_writer.finish()?;
    Ok(flaws)
}

fn new_png_writer<W: io::Write>(
    writer: W,
    options: &RecordOptions,
) -> Result<png::Writer<W>, anyhow::Error> {
    let size = options.image_size;
    let mut png_encoder = Encoder::new(writer, size.width, size.height);
    png_encoder.set_color(png::ColorType::Rgb);
    png_encoder.set_depth(png::BitDepth::Eight);
    png_encoder.set_compression(png::Compression::Best);
    if let Some(anim) = &options.animation {
        png_encoder.set_animated(
            anim.frame_count.try_into().context("too many frames")?,
            0,
        )?;
        png_encoder.set_frame_delay(
            anim.frame_period
                .as_millis()
                .try_into()
                .context("frame period too long")?,
            1000,
        )?;
    }
    let mut png_writer = png_encoder.write_header()?;
    write_color_metadata(&mut png_writer)?;
    Ok(png_writer)
}

fn write_color_metadata<W: io::Write>(png_writer: &mut png::Writer<W>) -> Result<(), io::Error> {
    // Values from <http://www.libpng.org/pub/png/spec/1.2/PNG-Chunks.html#C.sRGB>.

    // sRGB, perceptual rendering intent.
    png_writer.write_chunk(ChunkType(*b"sRGB"), &[0])?;
    // Gamma and chromaticities for decoders which do not understand sRGB.
    png_writer.write_chunk(ChunkType(*b"gAMA"), &45455_u32.to_be_bytes())?;
    png_writer.write_chunk(
        ChunkType(*b"cHRM"),
        &[
            31270, // White Point x
            32900, // White Point y
            64000, // Red x
            33000, // Red y
            30000, // Green x
            60000, // Green y
            15000, // Blue x
            6000,  // Blue y
        ]
        .into_iter()
        .flat_map(u32::to_be_bytes)
        .collect::<Box<[u8]>>(),
    )?;
    Ok(())
}

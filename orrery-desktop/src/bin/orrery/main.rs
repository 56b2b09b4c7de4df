//! Binary for the orrery headless renderer.

// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![forbid(unsafe_code)]

use std::time::Instant;

use anyhow::Context as _;
use clap::Parser as _;

use orrery_desktop::{headless_main_loop, logging, record, terminal};

mod command_options;
use command_options::{GraphicsType, OrreryArgs};

fn main() -> Result<(), anyhow::Error> {
    // Parse and transform command-line arguments.
    let options = OrreryArgs::parse();
    // Destructure as a check that we're using/skipping all the args
    let OrreryArgs {
        graphics: graphics_type,
        scene: _,        // used in SessionParams
        display_size: _, // used in SessionParams and RecordOptions
        frames,
        tick_angle: _,  // used in SessionParams
        orbit: _,       // used in SessionParams
        output_file: _, // used in RecordOptions
        options: options_args,
        logging: logging_args,
    } = options.clone();

    // Initialize logging -- telling it to suppress actual output when printing to stdout.
    logging::install(&logging_args, graphics_type.uses_terminal())?;

    let render_options = options_args.build_options()?;
    let params = options.session_params(render_options);
    log::debug!("{params:?}");

    let start_time = Instant::now();
    let mut renderer = params.create_renderer();

    match graphics_type {
        GraphicsType::Print => {
            for _ in 1..frames.get() {
                renderer.step();
            }
            let rendering = renderer.draw();
            terminal::terminal_print_once(&mut std::io::stdout().lock(), &rendering)
                .context("failed to print image")?;
        }
        GraphicsType::Record => {
            let record_options = options
                .record_options()
                .context("--output is required for --graphics record")?;
            record::record_main(renderer.as_mut(), &record_options)?;
        }
        GraphicsType::Headless => {
            headless_main_loop(renderer.as_mut(), frames.get() - 1);
        }
    }

    log::debug!(
        "Finished ({:.3} s)",
        Instant::now().duration_since(start_time).as_secs_f32()
    );
    Ok(())
}

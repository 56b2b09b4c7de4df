//! Logging to stderr.

use anyhow::Context as _;
use log::Log;

/// A [`clap::Args`] struct for options controlling log output to stderr.
#[derive(Clone, Debug, clap::Args)]
#[expect(clippy::module_name_repetitions)]
pub struct LoggingArgs {
    /// Additional logging to stderr.
    #[arg(long = "verbose", short = 'v')]
    pub verbose: bool,

    /// Remove timestamps from logs so that they are closer to deterministic.
    ///
    /// This option is intended for internal tests only.
    #[arg(long = "simplify-log-format", hide = true)]
    pub(crate) simplify_log_format: bool,
}

/// Install a [`log`] global logger based on user-provided `options`.
///
/// If `suppress_unless_explicit` is true, nothing is logged unless `--verbose` was given;
/// this is for modes which write to stdout themselves.
pub fn install(
    options: &LoggingArgs,
    suppress_unless_explicit: bool,
) -> Result<(), anyhow::Error> {
    let &LoggingArgs {
        verbose,
        simplify_log_format,
    } = options;

    let (max_level, stderr_logger) = if verbose || !suppress_unless_explicit {
        let logger = new_stderr_logger(verbose, simplify_log_format);
        (simplelog::SharedLogger::level(&*logger), Some(logger))
    } else {
        (log::LevelFilter::Off, None)
    };

    log::set_boxed_logger(Box::new(OrreryLogger { stderr_logger }))
        .context("failed to initialize logging")?;
    log::set_max_level(max_level);
    Ok(())
}

fn new_stderr_logger(
    verbose: bool,
    simplify_log_format: bool,
) -> Box<simplelog::WriteLogger<std::io::Stderr>> {
    use log::LevelFilter::{Debug, Error, Off, Trace};

    simplelog::WriteLogger::new(
        if verbose { Trace } else { Debug },
        // No target filters here; `OrreryLogger` applies `standard_filter` instead.
        simplelog::ConfigBuilder::new()
            .set_target_level(Off)
            .set_location_level(Off)
            .set_time_level(if simplify_log_format { Off } else { Error })
            .build(),
        std::io::stderr(),
    )
}

/// [`log::Log`] implementation that [`install()`] registers globally.
struct OrreryLogger {
    stderr_logger: Option<Box<simplelog::WriteLogger<std::io::Stderr>>>,
}

impl Log for OrreryLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        orrery_base::util::standard_filter(metadata)
            && self
                .stderr_logger
                .as_ref()
                .is_some_and(|l| l.enabled(metadata))
    }

    fn log(&self, record: &log::Record<'_>) {
        if !orrery_base::util::standard_filter(record.metadata()) {
            return;
        }
        if let Some(stderr_logger) = &self.stderr_logger {
            stderr_logger.log(record);
        }
    }

    fn flush(&self) {
        if let Some(stderr_logger) = &self.stderr_logger {
            stderr_logger.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noisy_targets_are_disabled() {
        let logger = OrreryLogger {
            stderr_logger: Some(new_stderr_logger(true, true)),
        };
        let metadata = |target: &'static str| {
            log::Metadata::builder()
                .target(target)
                .level(log::Level::Debug)
                .build()
        };
        assert!(logger.enabled(&metadata("orrery_render::state")));
        assert!(!logger.enabled(&metadata("png::encoder")));
    }

    #[test]
    fn suppressed_logger_is_disabled() {
        let logger = OrreryLogger {
            stderr_logger: None,
        };
        assert!(
            !logger.enabled(
                &log::Metadata::builder()
                    .target("orrery")
                    .level(log::Level::Error)
                    .build()
            )
        );
    }
}

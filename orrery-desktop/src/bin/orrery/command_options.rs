//! Command line option parsing.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::Parser;
use clap::builder::TypedValueParser as _;

use orrery::math::FreeCoordinate;
use orrery_desktop::logging::LoggingArgs;
use orrery_desktop::record::{RecordAnimationOptions, RecordOptions};
use orrery_desktop::{OptionsArgs, SceneChoice, SessionParams, choose_image_size};
use orrery_render::RenderOptions;
use orrery_render::camera::ImageSize;

#[derive(Clone, Debug, Parser)]
#[command(
    name = "orrery", author, about, version,
    help_template = "\
{name} {version}
{about-with-newline}
{usage-heading}
    {usage}

{all-args}{after-help}",
)]
pub(crate) struct OrreryArgs {
    /// What to do with the rendered frames.
    #[arg(long = "graphics", short = 'g', default_value = "print", value_name = "mode")]
    pub(crate) graphics: GraphicsType,

    /// Which scene to show.
    #[arg(long = "scene", short = 's', default_value = "orrery")]
    pub(crate) scene: SceneChoice,

    /// Image size.
    #[arg(long = "display-size", value_name = "W×H", default_value = "auto")]
    pub(crate) display_size: DisplaySizeArg,

    /// Number of frames to produce.
    ///
    /// * In 'record' mode, more than one frame makes an animated PNG.
    /// * In 'print' and 'headless' modes, the scene is advanced until the last frame.
    #[arg(
        long = "frames",
        short = 'n',
        default_value = "1",
        value_name = "N",
        verbatim_doc_comment
    )]
    pub(crate) frames: NonZeroUsize,

    /// Degrees each planet revolves per frame. Defaults to 1.
    #[arg(long = "tick-angle", value_name = "DEG", allow_negative_numbers = true)]
    pub(crate) tick_angle: Option<FreeCoordinate>,

    /// Degrees the camera orbits about the vertical axis per frame.
    #[arg(
        long = "orbit",
        value_name = "DEG",
        default_value = "0",
        allow_negative_numbers = true
    )]
    pub(crate) orbit: FreeCoordinate,

    /// Output file name for 'record' mode.
    ///
    /// The file name must have the extension “.png” or “.apng”.
    #[arg(
        long = "output",
        short = 'o',
        required_if_eq("graphics", "record"),
        value_name = "FILE",
        value_parser = clap::builder::PathBufValueParser::new().try_map(|value| {
            check_record_format(&value)?;
            Ok::<PathBuf, &str>(value)
        }),
    )]
    pub(crate) output_file: Option<PathBuf>,

    #[command(flatten)]
    pub(crate) options: OptionsArgs,

    #[command(flatten)]
    pub(crate) logging: LoggingArgs,
}

impl OrreryArgs {
    /// The image size requested, or the default for the graphics mode.
    pub(crate) fn image_size(&self) -> ImageSize {
        self.display_size
            .0
            .unwrap_or_else(|| choose_image_size(self.graphics == GraphicsType::Print))
    }

    /// Construct [`RecordOptions`].
    ///
    /// Returns [`None`] if recording was not requested (`output_file` not set).
    pub(crate) fn record_options(&self) -> Option<RecordOptions> {
        let output_path = self.output_file.clone()?;
        let animation = match self.frames.get() {
            1 => None,
            frame_count => Some(RecordAnimationOptions::per_tick(frame_count)),
        };
        Some(RecordOptions::new(output_path, self.image_size(), animation))
    }

    /// Construct [`SessionParams`] using the given rendering options.
    pub(crate) fn session_params(&self, options: RenderOptions) -> SessionParams {
        let mut params = SessionParams::new(self.scene, self.image_size(), options);
        params.tick_angle = self.tick_angle;
        params.orbit = self.orbit;
        params
    }
}

#[derive(
    Clone, Copy, Debug, Eq, PartialEq, clap::ValueEnum, strum::EnumString, strum::IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
pub(crate) enum GraphicsType {
    /// Print the last frame to this terminal as colored text.
    Print,
    /// Save an image or animation.
    Record,
    /// Don't draw anything but only advance the scene.
    Headless,
}

impl GraphicsType {
    /// Whether this graphics type writes to stdout, so logging should stay out of the way.
    pub(crate) fn uses_terminal(self) -> bool {
        match self {
            GraphicsType::Print => true,
            GraphicsType::Record | GraphicsType::Headless => false,
        }
    }
}

/// Image size, parseable in a variety of formats, and with `None` referring to
/// “automatic”, not “optional”.
#[derive(Clone, Copy, Debug)]
pub(crate) struct DisplaySizeArg(pub Option<ImageSize>);

impl FromStr for DisplaySizeArg {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("auto") {
            Ok(DisplaySizeArg(None))
        } else {
            let [width, height]: [u32; 2] = s
                .split(&['×', 'x', ',', ';', ' '][..])
                .map(|s| {
                    s.parse::<u32>()
                        .map_err(|_| format!("{s:?} not an integer or \"auto\""))
                })
                .collect::<Result<Vec<u32>, String>>()?
                .try_into()
                .map_err(|_| String::from("must be two integers or \"auto\""))?;
            if width == 0 || height == 0 {
                return Err(String::from("image must not be empty"));
            }
            Ok(DisplaySizeArg(Some(ImageSize::new(width, height))))
        }
    }
}

fn check_record_format(output_path: &Path) -> Result<(), &'static str> {
    match output_path.extension().and_then(|e| e.to_str()) {
        // PNG and APNG are the same format, just with one frame or several.
        Some("png" | "PNG" | "apng" | "APNG") => Ok(()),
        _ => Err("file name must have the extension 'png' or 'apng'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::{ContextKind, ContextValue, ErrorKind};
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn parse(args: &[&str]) -> clap::error::Result<OrreryArgs> {
        OrreryArgs::try_parse_from(std::iter::once("orrery").chain(args.iter().copied()))
    }

    fn error_context(error: &clap::Error, wanted_kind: ContextKind) -> Option<&ContextValue> {
        error
            .context()
            .find_map(|(k, v)| if k == wanted_kind { Some(v) } else { None })
    }

    #[test]
    fn defaults() {
        let args = parse(&[]).unwrap();
        assert_eq!(args.graphics, GraphicsType::Print);
        assert_eq!(args.scene, SceneChoice::Orrery);
        assert_eq!(args.image_size(), ImageSize::new(80, 48));
        assert_eq!(args.record_options(), None);
        assert_eq!(
            args.session_params(RenderOptions::default()),
            SessionParams::new(
                SceneChoice::Orrery,
                ImageSize::new(80, 48),
                RenderOptions::default()
            )
        );
    }

    #[test]
    fn record_options_image() {
        assert_eq!(
            parse(&["-g", "record", "-o", "output.png"])
                .unwrap()
                .record_options()
                .unwrap(),
            RecordOptions::new(PathBuf::from("output.png"), ImageSize::new(640, 480), None),
        );
    }

    #[test]
    fn record_options_animation() {
        let options = parse(&[
            "-g",
            "record",
            "-o",
            "fancy.apng",
            "--frames",
            "72",
            "--display-size",
            "100x50",
        ])
        .unwrap()
        .record_options()
        .unwrap();
        assert_eq!(options.image_size, ImageSize::new(100, 50));
        assert_eq!(
            options.animation,
            Some(RecordAnimationOptions::per_tick(72))
        );
        assert_eq!(
            options.animation.unwrap().frame_period,
            Duration::from_millis(50)
        );
    }

    #[test]
    fn record_options_missing_file() {
        let e = parse(&["-g", "record"]).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::MissingRequiredArgument);
        assert_eq!(
            error_context(&e, ContextKind::InvalidArg),
            Some(&ContextValue::Strings(vec![String::from("--output <FILE>")]))
        );
    }

    #[test]
    fn record_options_missing_extension() {
        let e = parse(&["-g", "record", "-o", "foo"]).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::ValueValidation);
        assert_eq!(
            error_context(&e, ContextKind::InvalidArg),
            Some(&ContextValue::String(String::from("--output <FILE>")))
        );
        assert!(
            e.to_string()
                .contains("file name must have the extension 'png' or 'apng'"),
            "{e}\n{e:?}"
        );
    }

    #[test]
    fn zero_frames() {
        let e = parse(&["--frames", "0"]).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn invalid_scene() {
        assert_eq!(
            parse(&["--scene", "teapot"]).unwrap_err().kind(),
            ErrorKind::InvalidValue
        );
    }

    #[test]
    fn angles() {
        let params = parse(&["--scene", "single-sphere", "--tick-angle", "-5", "--orbit", "2.5"])
            .unwrap()
            .session_params(RenderOptions::default());
        assert_eq!(params.scene, SceneChoice::SingleSphere);
        assert_eq!(params.tick_angle, Some(-5.0));
        assert_eq!(params.orbit, 2.5);
    }

    #[test]
    fn render_option_overrides() {
        let args = parse(&["-S", "focus=2", "--set", "render_method=\"wireframe\""]).unwrap();
        let options = args.options.build_options().unwrap();
        assert_eq!(options.focus, 2.0);
        assert_eq!(options.render_method, orrery_render::RenderMethod::Wireframe);
    }

    #[test]
    fn display_size_parse() {
        let parse = |s: &str| s.parse::<DisplaySizeArg>().map(|DisplaySizeArg(size)| size);
        let err = |s: &str| Err(s.to_owned());
        assert_eq!(parse("auto"), Ok(None));
        assert_eq!(parse("1,2"), Ok(Some(ImageSize::new(1, 2))));
        assert_eq!(parse("30x93"), Ok(Some(ImageSize::new(30, 93))));
        assert_eq!(parse("30×93"), Ok(Some(ImageSize::new(30, 93))));
        assert_eq!(parse(""), err("\"\" not an integer or \"auto\""));
        assert_eq!(parse("1"), err("must be two integers or \"auto\""));
        assert_eq!(parse("1a1"), err("\"1a1\" not an integer or \"auto\""));
        assert_eq!(parse("1×1×1"), err("must be two integers or \"auto\""));
        assert_eq!(parse("0x10"), err("image must not be empty"));
    }
}

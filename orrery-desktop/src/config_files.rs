use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use orrery_render::RenderOptions;

/// [`clap::Args`] argument group struct for args that affect what [`RenderOptions`] are used.
#[derive(Clone, Debug, Default, clap::Args)]
pub struct OptionsArgs {
    /// JSON file to read rendering options from. Options it does not mention keep their
    /// default values.
    #[arg(long = "options", value_name = "FILE.json")]
    pub(crate) options_file: Option<PathBuf>,

    #[expect(clippy::doc_markdown, reason = "will be displayed in --help")]
    /// Override the value of a rendering option, instead of taking it from the options file
    /// or defaults.
    ///
    /// The value is specified as a key-value pair where the key is an unquoted string, the
    /// separator is “=”, and the value is a JSON value (which, if a string, must be quoted);
    /// for example: -Srender_method='"wireframe"'
    #[arg(long = "set", short = 'S', value_parser = parse_configure, value_name = "NAME=JSON")]
    pub(crate) set: Vec<(String, serde_json::Value)>,
}

impl OptionsArgs {
    /// Constructs the [`RenderOptions`] a session with these args should use.
    pub fn build_options(self) -> Result<RenderOptions, anyhow::Error> {
        let Self {
            options_file,
            set: to_override,
        } = self;

        let mut options = match options_file {
            Some(path) => read_json_file("rendering options", &path)?,
            None => RenderOptions::default(),
        };

        if !to_override.is_empty() {
            let Ok(serde_json::Value::Object(mut current_options)) =
                serde_json::to_value(&options)
            else {
                unreachable!("rendering options should appear as a json object");
            };
            for (key, value) in to_override {
                current_options.insert(key, value);
            }
            options = serde_json::from_value(serde_json::Value::Object(current_options))
                .context("--set did not produce valid rendering options")?;
        }

        Ok(options)
    }
}

fn parse_configure(arg: &str) -> Result<(String, serde_json::Value), anyhow::Error> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("missing '='"))?;
    let value = serde_json::from_str(value)?;
    Ok((key.to_owned(), value))
}

fn read_json_file<V: serde::de::DeserializeOwned>(
    description: &str,
    path: &Path,
) -> Result<V, anyhow::Error> {
    let path_str = path.to_string_lossy();
    let file = File::open(path)
        .with_context(|| format!("could not open {description} file {path_str}"))?;
    let value = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("syntax error in {description} file {path_str}"))?;
    log::trace!("Loaded {description} from {path_str}");
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_render::RenderMethod;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        assert_eq!(
            OptionsArgs::default().build_options().unwrap(),
            RenderOptions::default()
        );
    }

    #[test]
    fn parse_configure_ok() {
        assert_eq!(
            parse_configure("focus=2.5").unwrap(),
            (String::from("focus"), serde_json::json!(2.5))
        );
        assert_eq!(
            parse_configure("render_method=\"wireframe\"").unwrap(),
            (String::from("render_method"), serde_json::json!("wireframe"))
        );
    }

    #[test]
    fn parse_configure_err() {
        assert_eq!(
            parse_configure("focus").unwrap_err().to_string(),
            "missing '='"
        );
        assert!(parse_configure("render_method=wireframe").is_err());
    }

    #[test]
    fn file_then_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("options.json");
        std::fs::write(&path, r#"{"render_method": "wireframe", "focus": 3.0}"#).unwrap();

        let options = OptionsArgs {
            options_file: Some(path),
            set: vec![(String::from("focus"), serde_json::json!(2.0))],
        }
        .build_options()
        .unwrap();

        let mut expected = RenderOptions::default();
        expected.render_method = RenderMethod::Wireframe;
        expected.focus = 2.0;
        assert_eq!(options, expected);
    }

    #[test]
    fn invalid_override() {
        let error = OptionsArgs {
            options_file: None,
            set: vec![(String::from("render_method"), serde_json::json!("sketch"))],
        }
        .build_options()
        .unwrap_err();
        assert_eq!(
            error.to_string(),
            "--set did not produce valid rendering options"
        );
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let error = OptionsArgs {
            options_file: Some(dir.path().join("absent.json")),
            set: vec![],
        }
        .build_options()
        .unwrap_err();
        assert!(
            error
                .to_string()
                .starts_with("could not open rendering options file"),
            "{error}"
        );
    }
}

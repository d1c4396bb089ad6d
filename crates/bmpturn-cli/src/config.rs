//! Pipeline configuration from a JSON file and command-line flags.
//!
//! Precedence, lowest first: built-in defaults, the JSON file, then explicit
//! flags. Missing keys in the file keep their defaults.
//!
//! ```json
//! { "input": "photo.bmp", "rotated_output": "out/rotated.bmp" }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use bmpturn_core::pipeline::PipelineConfig;
use log::debug;
use thiserror::Error;

/// Errors from loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file is not valid JSON for a pipeline config.
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Paths given explicitly on the command line.
#[derive(Debug, Default)]
pub struct PathOverrides {
    pub input: Option<PathBuf>,
    pub rotated_output: Option<PathBuf>,
    pub blurred_output: Option<PathBuf>,
}

/// Parse a config from JSON text.
pub fn parse_config(text: &str) -> Result<PipelineConfig, serde_json::Error> {
    serde_json::from_str(text)
}

/// Build the effective configuration.
pub fn resolve_config(
    file: Option<&Path>,
    overrides: PathOverrides,
) -> Result<PipelineConfig, ConfigError> {
    let mut config = match file {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            parse_config(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?
        }
        None => PipelineConfig::default(),
    };

    if let Some(input) = overrides.input {
        config.input = input;
    }
    if let Some(rotated) = overrides.rotated_output {
        config.rotated_output = rotated;
    }
    if let Some(blurred) = overrides.blurred_output {
        config.blurred_output = blurred;
    }

    debug!("Using {:?}", config);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let config = resolve_config(None, PathOverrides::default()).unwrap();
        assert_eq!(config, PipelineConfig::default());
        assert_eq!(config.input, PathBuf::from("bmp02.bmp"));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = parse_config(r#"{ "input": "photo.bmp" }"#).unwrap();
        assert_eq!(config.input, PathBuf::from("photo.bmp"));
        assert_eq!(config.rotated_output, PathBuf::from("finish.bmp"));
        assert_eq!(config.blurred_output, PathBuf::from("finishG.bmp"));
    }

    #[test]
    fn test_invalid_json() {
        assert!(parse_config("{ input: }").is_err());
        assert!(parse_config(r#"{ "input": 5 }"#).is_err());
    }

    #[test]
    fn test_flags_override_file() {
        let path = std::env::temp_dir().join(format!(
            "bmpturn_cli_config_{}.json",
            std::process::id()
        ));
        fs::write(
            &path,
            r#"{ "input": "a.bmp", "rotated_output": "b.bmp", "blurred_output": "c.bmp" }"#,
        )
        .unwrap();

        let overrides = PathOverrides {
            rotated_output: Some(PathBuf::from("override.bmp")),
            ..Default::default()
        };
        let config = resolve_config(Some(&path), overrides).unwrap();
        assert_eq!(config.input, PathBuf::from("a.bmp"));
        assert_eq!(config.rotated_output, PathBuf::from("override.bmp"));
        assert_eq!(config.blurred_output, PathBuf::from("c.bmp"));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file() {
        let path = std::env::temp_dir().join("bmpturn_cli_config_missing.json");
        let err = resolve_config(Some(&path), PathOverrides::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().starts_with("cannot read config"));
    }
}

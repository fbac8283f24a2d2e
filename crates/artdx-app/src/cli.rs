//! CLI argument definitions for the artdx terminal front-end.
//!
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::Parser;
use std::path::PathBuf;

/// artdx: an art-diagnostics chat that critiques an uploaded artwork.
#[derive(Parser, Debug)]
#[command(name = "artdx", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Artwork image (PNG or JPEG) to upload before the first question.
    #[arg(short = 'i', long = "image")]
    pub image: Option<PathBuf>,

    /// Model name, overriding `model.model` from the config file.
    #[arg(short = 'm', long = "model")]
    pub model: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// Ask a single question, print the answer and exit.
    #[arg(short = 'a', long = "ask")]
    pub ask: Option<String>,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > ARTDX_CONFIG env var > platform default (~/.artdx/config.toml).
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("ARTDX_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the log level.
    ///
    /// Priority: --log-level flag > config file value. `RUST_LOG` is honoured
    /// separately by the subscriber and beats both.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config_level.to_string())
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".artdx").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".artdx").join("config.toml");
    }
    PathBuf::from("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_flags() {
        let args = CliArgs::try_parse_from([
            "artdx",
            "--config",
            "/tmp/artdx.toml",
            "--image",
            "mona.png",
            "--model",
            "gemini-2.5-pro",
            "--log-level",
            "debug",
            "--ask",
            "What style is this?",
        ])
        .unwrap();

        assert_eq!(args.resolve_config_path(), PathBuf::from("/tmp/artdx.toml"));
        assert_eq!(args.image, Some(PathBuf::from("mona.png")));
        assert_eq!(args.model.as_deref(), Some("gemini-2.5-pro"));
        assert_eq!(args.resolve_log_level("info"), "debug");
        assert_eq!(args.ask.as_deref(), Some("What style is this?"));
    }

    #[test]
    fn test_log_level_falls_back_to_config() {
        let args = CliArgs::try_parse_from(["artdx"]).unwrap();
        assert_eq!(args.resolve_log_level("warn"), "warn");
        assert!(args.image.is_none());
        assert!(args.ask.is_none());
    }
}

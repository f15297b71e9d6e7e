use crate::constants;
use crate::error::{AlignError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_file_name")]
    pub file_name: String,
    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,
    /// Write a JSON run report next to the workbook.
    #[serde(default)]
    pub write_report: bool,
}

fn default_file_name() -> String {
    constants::DEFAULT_OUTPUT_FILE.to_string()
}

fn default_sheet_name() -> String {
    constants::DEFAULT_SHEET_NAME.to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file_name: default_file_name(),
            sheet_name: default_sheet_name(),
            write_report: false,
        }
    }
}

impl Config {
    /// Load `config.toml` from the working directory. The tool must run
    /// without one, so a missing file yields the defaults.
    pub fn load() -> Result<Self> {
        Self::load_from("config.toml")
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path).map_err(|e| {
            AlignError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| AlignError::Config(format!("Invalid config '{}': {}", path.display(), e)))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = Config::load_from("does_not_exist.toml").unwrap();
        assert_eq!(config.output.file_name, constants::DEFAULT_OUTPUT_FILE);
        assert_eq!(config.output.sheet_name, constants::DEFAULT_SHEET_NAME);
        assert!(!config.output.write_report);
    }

    #[test]
    fn partial_config_keeps_remaining_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[output]\nfile_name = \"custom.xlsx\"").unwrap();
        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.output.file_name, "custom.xlsx");
        assert_eq!(config.output.sheet_name, constants::DEFAULT_SHEET_NAME);
    }
}

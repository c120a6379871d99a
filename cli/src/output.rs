//! Rendering command results as YAML or JSON.

use std::fs;
use std::path::PathBuf;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

/// Where and how results are written.
#[derive(Debug, Clone, Default)]
pub struct Output {
    pub format: OutputFormat,
    /// Write here instead of stdout.
    pub file: Option<PathBuf>,
}

impl Output {
    pub fn new(format: OutputFormat, file: Option<PathBuf>) -> Self {
        Self { format, file }
    }

    /// Builds the output from the usual `--json` / `-o` flags.
    pub fn from_flags(json: bool, file: Option<PathBuf>) -> Self {
        let format = if json {
            OutputFormat::Json
        } else {
            OutputFormat::Yaml
        };
        Self::new(format, file)
    }

    pub fn render<T: Serialize>(&self, value: &T) -> anyhow::Result<String> {
        Ok(match self.format {
            OutputFormat::Yaml => serde_yaml::to_string(value)?,
            OutputFormat::Json => serde_json::to_string_pretty(value)?,
        })
    }

    pub fn write<T: Serialize>(&self, value: &T) -> anyhow::Result<()> {
        let output = self.render(value)?;
        match &self.file {
            Some(path) => fs::write(path, output)?,
            None => println!("{}", output),
        }
        Ok(())
    }
}

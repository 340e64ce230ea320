use std::{fs, path::Path};

use anyhow::Context;
use serde::Deserialize;

/// Settings read from an optional TOML file. Every key may be omitted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub window_size: usize,
    pub delimiter: char,
    pub precision: u16,
    pub skip_header: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_size: 5,
            delimiter: ',',
            precision: 6,
            skip_header: false,
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))
    }

    pub fn parse(contents: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

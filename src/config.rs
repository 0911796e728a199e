use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Directory renamed files are moved into.
    pub output_dir: PathBuf,

    /// Whitelist of file extensions to treat as track files.
    /// Examples: ["*.mp3", ".ogg", "ogg"]. Case-insensitive.
    #[serde(default = "default_file_extensions")]
    pub file_extensions: Vec<String>,
}

fn default_file_extensions() -> Vec<String> {
    vec!["*.mp3", "*.ogg"].into_iter().map(String::from).collect()
}

impl Config {
    pub fn from_path(path: &std::path::Path) -> anyhow::Result<Self> {
        let s = std::fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&s)?;
        Ok(cfg)
    }
}

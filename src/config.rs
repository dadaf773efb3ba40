use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::SiteError;

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub markdown: MarkdownConfig,
}

/// Where site generation reads content and writes pages
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub content_dir: PathBuf,
    pub static_dir: PathBuf,
    pub output_dir: PathBuf,
    pub template: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content"),
            static_dir: PathBuf::from("static"),
            output_dir: PathBuf::from("public"),
            template: PathBuf::from("template.html"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Remove blocks that are empty after trimming before classification.
    pub drop_empty_blocks: bool,
}

impl Config {
    /// The defaults shipped in `default_config.toml`.
    pub fn compiled_default() -> Self {
        // build.rs rejects a malformed default file, so this never falls back
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Load config from a TOML file, or return the compiled defaults if the
    /// file does not exist. Keys missing from the file keep their defaults.
    pub fn load(path: &Path) -> Result<Self, SiteError> {
        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content, path),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("No config at {}, using defaults", path.display());
                Ok(Self::compiled_default())
            }
            Err(e) => Err(SiteError::io(path, e)),
        }
    }

    fn parse(content: &str, path: &Path) -> Result<Self, SiteError> {
        toml::from_str(content).map_err(|source| SiteError::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn compiled_default_matches_struct_defaults() {
        let config = Config::compiled_default();
        assert_eq!(config.site.content_dir, PathBuf::from("content"));
        assert_eq!(config.site.static_dir, PathBuf::from("static"));
        assert_eq!(config.site.output_dir, PathBuf::from("public"));
        assert_eq!(config.site.template, PathBuf::from("template.html"));
        assert!(!config.markdown.drop_empty_blocks);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = Config::parse(
            "[site]\noutput_dir = \"dist\"\n\n[markdown]\ndrop_empty_blocks = true\n",
            Path::new("site.toml"),
        )
        .unwrap();
        assert_eq!(config.site.output_dir, PathBuf::from("dist"));
        assert_eq!(config.site.content_dir, PathBuf::from("content"));
        assert!(config.markdown.drop_empty_blocks);
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(&dir.path().join("site.toml")).unwrap();
        assert_eq!(config.site.template, PathBuf::from("template.html"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("site.toml");
        fs::write(&path, "[site\ncontent_dir = ").unwrap();
        assert!(matches!(
            Config::load(&path),
            Err(SiteError::Config { path: p, .. }) if p == path
        ));
    }
}

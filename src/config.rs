/// Project configuration loaded from `.tsdoc-links.toml`.
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::kinds::SchemaProfile;

/// Configuration file name looked up in the working directory.
const CONFIG_FILE: &str = ".tsdoc-links.toml";

/// Settings shared by every CLI command. Command-line flags override any
/// value set here.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    /// Path to the documentation-model JSON file.
    pub typedoc: Option<PathBuf>,
    /// URL prefix under which the generated documentation pages live.
    pub base_path: Option<String>,
    /// Named schema profile: `"legacy"` or `"modern"`.
    pub schema: Option<SchemaProfile>,
    /// Lower-case assembled link paths.
    pub fold_case: Option<bool>,
    /// Emit a stderr warning for every unresolved symbol.
    pub development: Option<bool>,
    /// Style tag overrides for produced links.
    #[serde(default)]
    pub style: Style,
}

/// The `[style]` table: class names attached to produced link nodes.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct Style {
    /// Style tag applied to every produced link.
    pub link_class: Option<String>,
    /// Additional style tag when the reference carries a display alias.
    pub aliased_class: Option<String>,
    /// Additional style tag when the symbol could not be resolved.
    pub missing_class: Option<String>,
}

impl Config {
    /// Load config from `.tsdoc-links.toml` in the given root directory.
    /// Returns all-defaults if the file doesn't exist. Returns an error if
    /// the file exists but is malformed — never silently falls back to
    /// defaults when the user wrote a config file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// or `Error::TomlDe` if the TOML is malformed.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join(CONFIG_FILE);
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::empty()),
            Err(e) => return Err(Error::Io(e)),
        };

        let config: Self = toml::from_str(&content)?;
        return Ok(config);
    }

    /// A config with nothing set: every command falls back to built-ins.
    fn empty() -> Self {
        return Self {
            typedoc: None,
            base_path: None,
            schema: None,
            fold_case: None,
            development: None,
            style: Style::default(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let raw = r#"
            typedoc = "docs/typedoc.json"
            base_path = "/api/"
            schema = "legacy"
            fold_case = false

            [style]
            link_class = "api-link"
        "#;
        let config: Config = toml::from_str(raw).unwrap();
        assert_eq!(config.typedoc.as_deref(), Some(Path::new("docs/typedoc.json")));
        assert_eq!(config.base_path.as_deref(), Some("/api/"));
        assert_eq!(config.schema, Some(SchemaProfile::Legacy));
        assert_eq!(config.fold_case, Some(false));
        assert_eq!(config.style.link_class.as_deref(), Some("api-link"));
        assert_eq!(config.style.missing_class, None);
    }

    #[test]
    fn missing_file_loads_empty_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert!(config.typedoc.is_none());
        assert!(config.schema.is_none());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "schema = [not toml").unwrap();
        assert!(Config::load(dir.path()).is_err());
    }
}

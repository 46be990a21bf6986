use folio_execute::Interpreters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "folio.config.json";

/// Folio configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Converter program
    #[serde(default = "default_pandoc")]
    pub pandoc: String,

    /// Markup format documents and parse-mode includes are written in
    #[serde(default = "default_from")]
    pub from: String,

    /// Output format for `folio render`
    #[serde(default = "default_to")]
    pub to: String,

    #[serde(default = "default_max_include_depth")]
    pub max_include_depth: usize,

    /// Directory top-level includes resolve against
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_dir: Option<String>,

    /// Extra or replacement interpreters for `exec` blocks
    #[serde(default)]
    pub interpreters: BTreeMap<String, Vec<String>>,

    #[serde(default = "default_diagram_engine")]
    pub diagram_engine: String,

    /// File extensions picked up when rendering a directory
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

fn default_pandoc() -> String {
    "pandoc".to_string()
}

fn default_from() -> String {
    "markdown".to_string()
}

fn default_to() -> String {
    "html".to_string()
}

fn default_max_include_depth() -> usize {
    folio_include::DEFAULT_MAX_DEPTH
}

fn default_diagram_engine() -> String {
    folio_execute::DEFAULT_ENGINE.to_string()
}

fn default_extensions() -> Vec<String> {
    vec!["md".to_string(), "markdown".to_string()]
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content).map_err(|e| {
                anyhow::anyhow!("Invalid {}: {}", config_path.display(), e)
            })?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Include base directory, absolute
    pub fn get_base_dir(&self, cwd: &Path) -> PathBuf {
        match &self.base_dir {
            Some(dir) => cwd.join(dir),
            None => cwd.to_path_buf(),
        }
    }

    /// Built-in interpreters overlaid with the configured ones
    pub fn interpreters(&self) -> Interpreters {
        let mut interpreters = Interpreters::default();
        interpreters.merge(self.interpreters.clone());
        interpreters
    }

    pub fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.extensions.iter().any(|e| e == ext))
            .unwrap_or(false)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pandoc: default_pandoc(),
            from: default_from(),
            to: default_to(),
            max_include_depth: default_max_include_depth(),
            base_dir: None,
            interpreters: BTreeMap::new(),
            diagram_engine: default_diagram_engine(),
            extensions: default_extensions(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "pandoc": "/opt/pandoc/bin/pandoc",
            "from": "commonmark",
            "maxIncludeDepth": 3,
            "baseDir": "chapters",
            "interpreters": { "python": ["python3.12", "-q"] },
            "diagramEngine": "neato"
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.pandoc, "/opt/pandoc/bin/pandoc");
        assert_eq!(config.from, "commonmark");
        assert_eq!(config.to, "html");
        assert_eq!(config.max_include_depth, 3);
        assert_eq!(config.base_dir, Some("chapters".to_string()));
        assert_eq!(config.diagram_engine, "neato");
        assert_eq!(
            config.interpreters().get("python"),
            Some(&["python3.12".to_string(), "-q".to_string()][..])
        );
        assert!(config.interpreters().get("sh").is_some());
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.pandoc, "pandoc");
        assert_eq!(config.max_include_depth, 10);
        assert_eq!(config.diagram_engine, "dot");
        assert_eq!(config.get_base_dir(Path::new("/book")), PathBuf::from("/book"));
        assert!(config.matches_extension(Path::new("a/b.md")));
        assert!(!config.matches_extension(Path::new("a/b.txt")));
    }

    #[test]
    fn test_load_missing_and_invalid() {
        let dir = TempDir::new().unwrap();
        assert_eq!(Config::load(dir.path()).unwrap(), Config::default());

        std::fs::write(dir.path().join(DEFAULT_CONFIG_NAME), "{ not json").unwrap();
        let err = Config::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains(DEFAULT_CONFIG_NAME));
    }
}

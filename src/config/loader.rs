use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::config::access::Document;

/// Default configuration file name.
pub const DEFAULT_FILE_NAME: &str = "config.json";

/// Environment variable selecting `config.<value>.json`.
pub const ENVIRONMENT_VAR: &str = "ENVIRONMENT";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to find config file '{file_name}' (searched: {})", display_paths(.searched))]
    NotFound {
        file_name: String,
        searched: Vec<PathBuf>,
    },

    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config from {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Config from {origin} must be a JSON object, found {found}")]
    NotAnObject { origin: String, found: &'static str },
}

impl ConfigError {
    /// True for both malformed JSON and a non-object root.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Parse { .. } | Self::NotAnObject { .. })
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Pick the config file name for an environment.
///
/// `Some("prod")` gives `config.prod.json`; `None` or an empty value gives
/// `config.json`.
pub fn config_file_name(environment: Option<&str>) -> String {
    match environment.map(str::trim) {
        Some(env) if !env.is_empty() => format!("config.{env}.json"),
        _ => DEFAULT_FILE_NAME.to_string(),
    }
}

/// Parse an in-memory buffer into a document.
pub fn read_from(bytes: &[u8]) -> Result<Document, ConfigError> {
    parse_document(bytes, "memory")
}

fn parse_document(bytes: &[u8], origin: &str) -> Result<Document, ConfigError> {
    let value: Value = serde_json::from_slice(bytes).map_err(|e| ConfigError::Parse {
        origin: origin.to_string(),
        source: e,
    })?;

    match value {
        Value::Object(document) => Ok(document),
        other => Err(ConfigError::NotAnObject {
            origin: origin.to_string(),
            found: kind_name(&other),
        }),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A document together with the file it came from.
#[derive(Debug, Clone)]
pub struct Loaded {
    pub path: PathBuf,
    pub document: Document,
}

/// Locates and parses the configuration file.
///
/// Candidates are `<dir>/<file_name>` for each search directory, in order;
/// the first one that exists is read.
#[derive(Debug, Clone)]
pub struct Loader {
    file_name: String,
    search_dirs: Vec<PathBuf>,
}

impl Loader {
    /// Loader for `file_name` over the default search path.
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            search_dirs: default_search_dirs(),
        }
    }

    /// Loader whose file name comes from `ENVIRONMENT`, read once here.
    pub fn from_env() -> Self {
        let environment = std::env::var(ENVIRONMENT_VAR).ok();
        Self::new(config_file_name(environment.as_deref()))
    }

    /// Replace the search path.
    pub fn with_search_dirs<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.search_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn search_dirs(&self) -> &[PathBuf] {
        &self.search_dirs
    }

    /// First candidate path that exists.
    pub fn locate(&self) -> Result<PathBuf, ConfigError> {
        let mut searched = Vec::with_capacity(self.search_dirs.len());

        for dir in &self.search_dirs {
            let candidate = dir.join(&self.file_name);
            if candidate.is_file() {
                return Ok(candidate);
            }
            searched.push(candidate);
        }

        Err(ConfigError::NotFound {
            file_name: self.file_name.clone(),
            searched,
        })
    }

    /// Locate, read and parse the file. Touches no shared state.
    pub fn load(&self) -> Result<Loaded, ConfigError> {
        let path = self.locate()?;
        let document = load_path(&path)?;
        Ok(Loaded { path, document })
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::from_env()
    }
}

fn load_path(path: &Path) -> Result<Document, ConfigError> {
    let bytes = fs::read(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_document(&bytes, &format!("'{}'", path.display()))
}

/// Executable directory first, then the current working directory.
fn default_search_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::with_capacity(2);

    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        dirs.push(exe_dir);
    }

    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }

    dirs
}

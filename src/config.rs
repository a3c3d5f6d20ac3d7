use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use tracing::warn;

use crate::error::{NotionError, Result};

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub page: PageConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Sent as the `Notion-Version` header on every request.
    pub version: String,
    /// Name of the environment variable holding the integration token.
    pub token_env: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.notion.com/v1".to_string(),
            version: "2022-06-28".to_string(),
            token_env: "NOTION_API_KEY".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Title given to every page created by `save`.
    pub title: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: "AI Agent Architecture".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub display_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { display_limit: 5 }
    }
}

impl Config {
    /// Load config from a TOML file, or return defaults if not found.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_else(|e| {
                warn!("ignoring invalid config {}: {}", path.display(), e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }
}

/// `KEY=VALUE` pairs read from a dotenv-style file.
#[derive(Debug, Default)]
pub struct EnvFile {
    vars: HashMap<String, String>,
}

impl EnvFile {
    /// Read an env file. A missing file yields an empty set.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(Self::parse(&content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(NotionError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Blank lines, `#` comments and lines without `=` are skipped. Later
    /// keys win.
    pub fn parse(content: &str) -> Self {
        let vars = content
            .lines()
            .filter(|line| !line.trim().is_empty() && !line.starts_with('#'))
            .filter_map(|line| line.trim().split_once('='))
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Self { vars }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }
}

/// The integration token used for bearer auth.
#[derive(Clone)]
pub struct Credentials {
    token: String,
}

impl Credentials {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Look up `var` in the process environment, then in `env_file`.
    pub fn from_env(var: &str, env_file: &EnvFile) -> Result<Self> {
        Self::resolve(var, std::env::var(var).ok(), env_file)
    }

    /// Empty values count as missing.
    pub fn resolve(var: &str, from_process: Option<String>, env_file: &EnvFile) -> Result<Self> {
        from_process
            .filter(|token| !token.is_empty())
            .or_else(|| {
                env_file
                    .get(var)
                    .filter(|token| !token.is_empty())
                    .map(str::to_string)
            })
            .map(Self::new)
            .ok_or_else(|| NotionError::MissingToken(var.to_string()))
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "https://api.notion.com/v1");
        assert_eq!(config.api.version, "2022-06-28");
        assert_eq!(config.api.token_env, "NOTION_API_KEY");
        assert_eq!(config.page.title, "AI Agent Architecture");
        assert_eq!(config.search.display_limit, 5);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = Config::load(Path::new("/nonexistent/notion-md.toml"));
        assert_eq!(config.search.display_limit, 5);
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[page]\ntitle = \"Notes\"\n\n[search]\ndisplay_limit = 10").unwrap();

        let config = Config::load(file.path());
        assert_eq!(config.page.title, "Notes");
        assert_eq!(config.search.display_limit, 10);
        assert_eq!(config.api.version, "2022-06-28");
    }

    #[test]
    fn test_load_invalid_file_uses_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[page\ntitle = ").unwrap();

        let config = Config::load(file.path());
        assert_eq!(config.page.title, "AI Agent Architecture");
    }

    #[test]
    fn test_env_file_parse() {
        let env = EnvFile::parse(
            "# comment\n\nNOTION_API_KEY=secret_abc=def\nNOT_A_PAIR\n  OTHER=1  \n",
        );
        assert_eq!(env.get("NOTION_API_KEY"), Some("secret_abc=def"));
        assert_eq!(env.get("OTHER"), Some("1"));
        assert_eq!(env.get("NOT_A_PAIR"), None);
    }

    #[test]
    fn test_env_file_missing_is_empty() {
        let env = EnvFile::load(Path::new("/nonexistent/.env")).unwrap();
        assert_eq!(env.get("NOTION_API_KEY"), None);
    }

    #[test]
    fn test_env_file_load() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "NOTION_API_KEY=from_file").unwrap();

        let env = EnvFile::load(file.path()).unwrap();
        assert_eq!(env.get("NOTION_API_KEY"), Some("from_file"));
    }

    #[test]
    fn test_credentials_prefer_process_env() {
        let env = EnvFile::parse("KEY=from_file");
        let creds = Credentials::resolve("KEY", Some("from_env".into()), &env).unwrap();
        assert_eq!(creds.token(), "from_env");
    }

    #[test]
    fn test_credentials_fall_back_to_env_file() {
        let env = EnvFile::parse("KEY=from_file");
        let creds = Credentials::resolve("KEY", Some(String::new()), &env).unwrap();
        assert_eq!(creds.token(), "from_file");
    }

    #[test]
    fn test_credentials_missing() {
        let err = Credentials::resolve("KEY", None, &EnvFile::default()).unwrap_err();
        assert!(matches!(err, NotionError::MissingToken(ref var) if var == "KEY"));
    }

    #[test]
    fn test_credentials_debug_redacts_token() {
        let creds = Credentials::new("secret_abc");
        assert!(!format!("{:?}", creds).contains("secret_abc"));
    }
}

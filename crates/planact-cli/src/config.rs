use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "https://apiplanact.onrender.com/api";
pub const API_URL_ENV: &str = "PLANACT_API_URL";

/// Configuração do cliente. Camadas, da menor para a maior precedência:
/// padrões, arquivo TOML, variáveis de ambiente e flags de linha de comando.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    pub timeout_secs: u64,
    pub log_level: String,
    pub export_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: 30,
            log_level: "warn".to_string(),
            export_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Caminho padrão: `<config_dir>/planact/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("planact").join("config.toml"))
    }

    /// Carrega o arquivo indicado ou o padrão. O arquivo padrão é opcional;
    /// um caminho passado explicitamente precisa existir.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };
        Ok(config.normalized())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Falha ao ler configuração {}", path.display()))?;
        Self::from_toml_str(&text)
            .with_context(|| format!("Configuração inválida em {}", path.display()))
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)?;
        Ok(config.normalized())
    }

    /// Aplica as variáveis de ambiente. `lookup` recebe o nome da variável.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.set_api_url(&url);
        }
    }

    pub fn set_api_url(&mut self, url: &str) {
        self.api_url = normalize_url(url);
    }

    fn normalized(mut self) -> Self {
        self.api_url = normalize_url(&self.api_url);
        self
    }
}

fn normalize_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api_url, "https://apiplanact.onrender.com/api");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
api_url = "http://localhost:3000/api/"
log_level = "debug"
"#,
        )
        .unwrap();

        assert_eq!(config.api_url, "http://localhost:3000/api");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.export_dir, PathBuf::from("."));
    }

    #[test]
    fn test_invalid_toml_is_error() {
        assert!(Config::from_toml_str("timeout_secs = \"trinta\"").is_err());
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config = Config::from_toml_str(r#"api_url = "http://arquivo/api""#).unwrap();
        let env: HashMap<&str, &str> = [(API_URL_ENV, "http://ambiente/api/")].into();

        config.apply_env(|name| env.get(name).map(|v| v.to_string()));
        assert_eq!(config.api_url, "http://ambiente/api");

        config.apply_env(|_| Some("  ".to_string()));
        assert_eq!(config.api_url, "http://ambiente/api");
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "timeout_secs = 5\nexport_dir = \"relatorios\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.export_dir, PathBuf::from("relatorios"));
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("nao-existe.toml"))).unwrap_err();
        assert!(err.to_string().contains("Falha ao ler configuração"));
    }
}

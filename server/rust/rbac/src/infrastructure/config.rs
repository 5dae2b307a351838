use serde::Deserialize;

use super::database::DatabaseConfig;

/// Application configuration for the RBAC server.
#[derive(Debug, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    #[serde(default)]
    pub permission_cache: PermissionCacheConfig,
    /// インメモリストアの初期データ。database 未設定時のみ使用する。
    #[serde(default)]
    pub seed_path: Option<String>,
}

impl Config {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        let cfg: Config = serde_yaml::from_str(content)?;
        Ok(cfg)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_environment")]
    pub environment: String,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

fn default_environment() -> String {
    "dev".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// PermissionCacheConfig は href 権限キャッシュの退避ポリシー。
#[derive(Debug, Clone, Deserialize)]
pub struct PermissionCacheConfig {
    #[serde(default = "default_permission_cache_ttl_secs")]
    pub ttl_secs: u64,
    #[serde(default = "default_permission_cache_max_capacity")]
    pub max_capacity: u64,
    /// 最終アクセスからの有効期限。未設定なら TTL のみで退避する。
    #[serde(default)]
    pub tti_secs: Option<u64>,
}

impl Default for PermissionCacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_permission_cache_ttl_secs(),
            max_capacity: default_permission_cache_max_capacity(),
            tti_secs: None,
        }
    }
}

fn default_permission_cache_ttl_secs() -> u64 {
    300
}

fn default_permission_cache_max_capacity() -> u64 {
    10_000
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let cfg = Config::from_yaml("app:\n  name: keep-rbac-server\n").unwrap();
        assert_eq!(cfg.app.name, "keep-rbac-server");
        assert_eq!(cfg.app.version, "0.1.0");
        assert_eq!(cfg.app.environment, "dev");
        assert_eq!(cfg.server.port, 8080);
        assert!(cfg.database.is_none());
        assert_eq!(cfg.permission_cache.ttl_secs, 300);
        assert_eq!(cfg.permission_cache.max_capacity, 10_000);
        assert!(cfg.permission_cache.tti_secs.is_none());
        assert!(cfg.seed_path.is_none());
    }

    #[test]
    fn test_full_config() {
        let yaml = r#"
app:
  name: keep-rbac-server
  version: 1.0.0
  environment: prod
server:
  host: 127.0.0.1
  port: 9090
database:
  host: localhost
  name: keep_rbac
  user: app
  password: secret
permission_cache:
  ttl_secs: 60
  max_capacity: 500
  tti_secs: 30
seed_path: config/seed.yaml
"#;
        let cfg = Config::from_yaml(yaml).unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 9090);
        let db = cfg.database.unwrap();
        assert_eq!(db.password.expose_secret(), "secret");
        assert_eq!(cfg.permission_cache.tti_secs, Some(30));
        assert_eq!(cfg.seed_path.as_deref(), Some("config/seed.yaml"));
    }

    #[test]
    fn test_missing_app_section_is_error() {
        assert!(Config::from_yaml("server:\n  port: 80\n").is_err());
    }

    #[test]
    fn test_load_missing_file_is_error() {
        assert!(Config::load("/nonexistent/config.yaml").is_err());
    }
}

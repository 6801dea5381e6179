use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_WORKER_THREADS: usize = 4;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
}

/// `[server]` table. Every member is optional so one file can be shared by
/// both services; the unset port falls back to the service's own default.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ServerConfig {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

/// Fully resolved bind settings for one service process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindConfig {
    pub host: String,
    pub port: u16,
    pub worker_threads: usize,
}

impl BindConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content)
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

/// Environment overrides, read once so resolution stays a pure function.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub host: Option<String>,
    pub port: Option<String>,
    pub worker_threads: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("SERVER_HOST").ok(),
            port: std::env::var("PORT").ok(),
            worker_threads: std::env::var("TOKIO_WORKER_THREADS").ok(),
        }
    }
}

impl AppConfig {
    /// Load the optional config file, then apply env overrides for a service
    /// whose default port is `default_port`. A missing file is not an error;
    /// an unreadable or malformed one is.
    pub fn resolve_for(default_port: u16) -> Result<BindConfig> {
        let path = config_path();
        let cfg = if std::path::Path::new(&path).exists() {
            load_from_file(&path).map_err(|e| anyhow!("cannot load {path}: {e}"))?
        } else {
            AppConfig::default()
        };
        cfg.resolve(default_port, &EnvOverrides::from_env())
    }

    /// 优先级：环境变量 > 配置文件 > 服务默认值
    pub fn resolve(&self, default_port: u16, env: &EnvOverrides) -> Result<BindConfig> {
        let host = env
            .host
            .clone()
            .filter(|h| !h.trim().is_empty())
            .or_else(|| self.server.host.clone().filter(|h| !h.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match env.port.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| anyhow!("PORT must be a number in 1..=65535, got {raw:?}: {e}"))?,
            None => self.server.port.unwrap_or(default_port),
        };
        if port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }

        let worker_threads = self
            .server
            .worker_threads
            .or_else(|| env.worker_threads.as_deref().and_then(|v| v.trim().parse::<usize>().ok()))
            .filter(|w| *w > 0)
            .unwrap_or(DEFAULT_WORKER_THREADS);

        Ok(BindConfig { host, port, worker_threads })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_file_or_env() {
        let bind = AppConfig::default().resolve(3001, &EnvOverrides::default()).unwrap();
        assert_eq!(bind, BindConfig { host: "0.0.0.0".into(), port: 3001, worker_threads: 4 });
        assert_eq!(bind.addr(), "0.0.0.0:3001");
    }

    #[test]
    fn file_values_are_used() {
        let cfg = load_from_str(
            r#"
            [server]
            host = "127.0.0.1"
            port = 8081
            worker_threads = 2
            "#,
        )
        .unwrap();
        let bind = cfg.resolve(3000, &EnvOverrides::default()).unwrap();
        assert_eq!(bind.host, "127.0.0.1");
        assert_eq!(bind.port, 8081);
        assert_eq!(bind.worker_threads, 2);
    }

    #[test]
    fn env_port_beats_file() {
        let cfg = load_from_str("[server]\nport = 8081\n").unwrap();
        let env = EnvOverrides { port: Some("9000".into()), ..Default::default() };
        assert_eq!(cfg.resolve(3000, &env).unwrap().port, 9000);
    }

    #[test]
    fn invalid_port_is_rejected() {
        let env = EnvOverrides { port: Some("http".into()), ..Default::default() };
        assert!(AppConfig::default().resolve(3000, &env).is_err());
        let env = EnvOverrides { port: Some("0".into()), ..Default::default() };
        assert!(AppConfig::default().resolve(3000, &env).is_err());
    }

    #[test]
    fn zero_workers_normalised() {
        let cfg = load_from_str("[server]\nworker_threads = 0\n").unwrap();
        assert_eq!(cfg.resolve(3000, &EnvOverrides::default()).unwrap().worker_threads, 4);
        let env = EnvOverrides { worker_threads: Some("8".into()), ..Default::default() };
        assert_eq!(AppConfig::default().resolve(3000, &env).unwrap().worker_threads, 8);
    }

    #[test]
    fn malformed_file_is_an_error() {
        assert!(load_from_str("[server]\nport = \"eighty\"\n").is_err());
    }

    #[test]
    fn empty_file_is_valid() {
        let cfg = load_from_str("").unwrap();
        assert!(cfg.server.port.is_none());
    }
}

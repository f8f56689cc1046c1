use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use anyhow::Context;

use papermeta_core::config_file::ServerConfig;

pub const DEFAULT_BIND: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_UPLOAD_DIR: &str = "temp_uploads";
pub const DEFAULT_MAX_UPLOAD_MB: usize = 50;

/// Fully resolved server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub bind: String,
    pub port: u16,
    pub upload_dir: PathBuf,
    pub max_upload_mb: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            port: DEFAULT_PORT,
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            max_upload_mb: DEFAULT_MAX_UPLOAD_MB,
        }
    }
}

/// One layer of optional settings (environment or command line).
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub bind: Option<String>,
    pub port: Option<u16>,
    pub upload_dir: Option<PathBuf>,
    pub max_upload_mb: Option<usize>,
}

impl ServerSettings {
    /// Resolve settings with precedence: CLI > env > config file > defaults.
    pub fn resolve(file: Option<&ServerConfig>, env: &Overrides, cli: &Overrides) -> Self {
        let defaults = Self::default();
        let file = file.cloned().unwrap_or_default();

        Self {
            bind: cli
                .bind
                .clone()
                .or_else(|| env.bind.clone())
                .or(file.bind)
                .unwrap_or(defaults.bind),
            port: cli.port.or(env.port).or(file.port).unwrap_or(defaults.port),
            upload_dir: cli
                .upload_dir
                .clone()
                .or_else(|| env.upload_dir.clone())
                .or_else(|| file.upload_dir.map(PathBuf::from))
                .unwrap_or(defaults.upload_dir),
            max_upload_mb: cli
                .max_upload_mb
                .or(env.max_upload_mb)
                .or(file.max_upload_mb)
                .unwrap_or(defaults.max_upload_mb),
        }
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let ip: IpAddr = self
            .bind
            .parse()
            .with_context(|| format!("invalid bind address `{}`", self.bind))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
}

/// Read `PAPERMETA_BIND`, `PAPERMETA_PORT`, `PAPERMETA_UPLOAD_DIR` and
/// `PAPERMETA_MAX_UPLOAD_MB` through `lookup`. Empty values are ignored.
pub fn overrides_from_env(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Overrides> {
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    let port = get("PAPERMETA_PORT")
        .map(|v| v.trim().parse::<u16>())
        .transpose()
        .context("PAPERMETA_PORT must be a port number")?;
    let max_upload_mb = get("PAPERMETA_MAX_UPLOAD_MB")
        .map(|v| v.trim().parse::<usize>())
        .transpose()
        .context("PAPERMETA_MAX_UPLOAD_MB must be a whole number of megabytes")?;

    Ok(Overrides {
        bind: get("PAPERMETA_BIND"),
        port,
        upload_dir: get("PAPERMETA_UPLOAD_DIR").map(PathBuf::from),
        max_upload_mb,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = ServerSettings::resolve(None, &Overrides::default(), &Overrides::default());
        assert_eq!(settings, ServerSettings::default());
        assert_eq!(settings.max_upload_bytes(), 50 * 1024 * 1024);
    }

    #[test]
    fn test_precedence() {
        let file = ServerConfig {
            bind: Some("127.0.0.1".to_string()),
            port: Some(8000),
            upload_dir: Some("/tmp/from-file".to_string()),
            max_upload_mb: Some(10),
        };
        let env = Overrides {
            port: Some(9000),
            upload_dir: Some(PathBuf::from("/tmp/from-env")),
            ..Default::default()
        };
        let cli = Overrides {
            port: Some(9100),
            ..Default::default()
        };

        let settings = ServerSettings::resolve(Some(&file), &env, &cli);
        assert_eq!(settings.bind, "127.0.0.1");
        assert_eq!(settings.port, 9100);
        assert_eq!(settings.upload_dir, PathBuf::from("/tmp/from-env"));
        assert_eq!(settings.max_upload_mb, 10);
    }

    #[test]
    fn test_env_overrides() {
        let env = overrides_from_env(lookup(&[
            ("PAPERMETA_PORT", "8080"),
            ("PAPERMETA_BIND", ""),
            ("PAPERMETA_MAX_UPLOAD_MB", " 5 "),
        ]))
        .unwrap();
        assert_eq!(env.port, Some(8080));
        assert_eq!(env.bind, None);
        assert_eq!(env.max_upload_mb, Some(5));
        assert_eq!(env.upload_dir, None);
    }

    #[test]
    fn test_env_invalid_port() {
        assert!(overrides_from_env(lookup(&[("PAPERMETA_PORT", "http")])).is_err());
    }

    #[test]
    fn test_socket_addr() {
        let settings = ServerSettings::default();
        assert_eq!(settings.socket_addr().unwrap().port(), 5000);

        let bad = ServerSettings {
            bind: "not-an-ip".to_string(),
            ..Default::default()
        };
        assert!(bad.socket_addr().is_err());
    }
}

use std::{fmt, str::FromStr};

use anyhow::{anyhow, Result};
use serde::Deserialize;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_WORKER_THREADS: usize = 4;
pub const DEFAULT_SERVICE_NAME: &str = "ww-wishlist-backend";
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub wishlist: WishlistConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: DEFAULT_PORT, worker_threads: Some(DEFAULT_WORKER_THREADS) }
    }
}

/// How saved items are treated before they reach the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemMode {
    /// Items are kept verbatim as arbitrary JSON values.
    #[default]
    Opaque,
    /// Items are coerced to trimmed strings, blanks and duplicates dropped.
    UniqueIds,
}

impl ItemMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemMode::Opaque => "opaque",
            ItemMode::UniqueIds => "unique_ids",
        }
    }
}

impl fmt::Display for ItemMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "opaque" => Ok(ItemMode::Opaque),
            "unique_ids" | "strings" => Ok(ItemMode::UniqueIds),
            other => Err(anyhow!("unknown wishlist.item_mode: {other}")),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WishlistConfig {
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default)]
    pub item_mode: ItemMode,
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

impl Default for WishlistConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            item_mode: ItemMode::default(),
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
        }
    }
}

fn default_host() -> String { DEFAULT_HOST.to_string() }
fn default_port() -> u16 { DEFAULT_PORT }
fn default_service_name() -> String { DEFAULT_SERVICE_NAME.to_string() }
fn default_body_limit() -> usize { DEFAULT_BODY_LIMIT_BYTES }

/// Read `CONFIG_PATH` (default `config.toml`); an absent file yields defaults.
pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    if !std::path::Path::new(&path).exists() {
        return Ok(AppConfig::default());
    }
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content)
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load the config file, apply env overrides and validate.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.apply_overrides(|key| std::env::var(key).ok())?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// `PORT`, `HOST`, `TOKIO_WORKER_THREADS` and `WISHLIST_ITEM_MODE`, as
    /// looked up by `get`, take precedence over the file.
    pub fn apply_overrides(&mut self, get: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(port) = get("PORT") {
            self.server.port = port
                .trim()
                .parse::<u16>()
                .map_err(|e| anyhow!("PORT must be a port number: {e}"))?;
        }
        if let Some(host) = get("HOST") {
            self.server.host = host;
        }
        if let Some(w) = get("TOKIO_WORKER_THREADS").and_then(|v| v.trim().parse::<usize>().ok()) {
            self.server.worker_threads = Some(w);
        }
        if let Some(mode) = get("WISHLIST_ITEM_MODE") {
            self.wishlist.item_mode = mode.parse()?;
        }
        Ok(())
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.wishlist.normalize()?;
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(DEFAULT_WORKER_THREADS),
            Some(_) => {}
        }
        Ok(())
    }
}

impl WishlistConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.service_name.trim().is_empty() {
            self.service_name = default_service_name();
        }
        if self.body_limit_bytes == 0 {
            return Err(anyhow!("wishlist.body_limit_bytes must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let mut cfg = load_from_str("").unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert_eq!(cfg.wishlist.item_mode, ItemMode::Opaque);
        assert_eq!(cfg.wishlist.body_limit_bytes, 1024 * 1024);
        assert_eq!(cfg.wishlist.service_name, "ww-wishlist-backend");
    }

    #[test]
    fn parses_full_file() {
        let cfg = load_from_str(
            r#"
            [server]
            host = "127.0.0.1"
            port = 8088
            worker_threads = 2

            [wishlist]
            service_name = "wl"
            item_mode = "unique_ids"
            body_limit_bytes = 2048
            "#,
        )
        .unwrap();
        assert_eq!(cfg.bind_addr(), "127.0.0.1:8088");
        assert_eq!(cfg.server.worker_threads, Some(2));
        assert_eq!(cfg.wishlist.item_mode, ItemMode::UniqueIds);
        assert_eq!(cfg.wishlist.body_limit_bytes, 2048);
    }

    #[test]
    fn rejects_zero_port_and_zero_limit() {
        let mut cfg = AppConfig::default();
        cfg.server.port = 0;
        assert!(cfg.normalize_and_validate().is_err());

        let mut cfg = AppConfig::default();
        cfg.wishlist.body_limit_bytes = 0;
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn normalizes_blank_values() {
        let mut cfg = AppConfig::default();
        cfg.server.host = "  ".into();
        cfg.server.worker_threads = Some(0);
        cfg.wishlist.service_name = String::new();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert_eq!(cfg.wishlist.service_name, "ww-wishlist-backend");
    }

    fn vars(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key: &str| pairs.iter().find(|(k, _)| *k == key).map(|(_, v)| v.to_string())
    }

    #[test]
    fn port_override_selects_listen_port() {
        let mut cfg = load_from_str("[server]\nport = 8080\n").unwrap();
        cfg.apply_overrides(vars(&[("PORT", "4000")])).unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.port, 4000);
        assert_eq!(cfg.bind_addr(), "0.0.0.0:4000");
    }

    #[test]
    fn no_overrides_keep_file_values() {
        let mut cfg = load_from_str("[server]\nport = 8080\n").unwrap();
        cfg.apply_overrides(vars(&[])).unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.wishlist.item_mode, ItemMode::Opaque);
    }

    #[test]
    fn invalid_port_override_is_an_error() {
        let mut cfg = AppConfig::default();
        assert!(cfg.apply_overrides(vars(&[("PORT", "not-a-port")])).is_err());
        assert!(cfg.apply_overrides(vars(&[("PORT", "70000")])).is_err());
    }

    #[test]
    fn host_threads_and_item_mode_overrides() {
        let mut cfg = AppConfig::default();
        cfg.apply_overrides(vars(&[
            ("HOST", "127.0.0.1"),
            ("TOKIO_WORKER_THREADS", "8"),
            ("WISHLIST_ITEM_MODE", "unique_ids"),
        ]))
        .unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.worker_threads, Some(8));
        assert_eq!(cfg.wishlist.item_mode, ItemMode::UniqueIds);

        assert!(cfg.apply_overrides(vars(&[("WISHLIST_ITEM_MODE", "records")])).is_err());
    }

    #[test]
    fn item_mode_from_str() {
        assert_eq!("Opaque".parse::<ItemMode>().unwrap(), ItemMode::Opaque);
        assert_eq!(" unique_ids ".parse::<ItemMode>().unwrap(), ItemMode::UniqueIds);
        assert_eq!("strings".parse::<ItemMode>().unwrap(), ItemMode::UniqueIds);
        assert!("records".parse::<ItemMode>().is_err());
    }
}

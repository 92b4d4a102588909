use std::path::PathBuf;

use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

/// Earth radius used by the haversine distance, kilometres.
pub const DEFAULT_EARTH_RADIUS_KM: f64 = 6371.0;
/// Inclusive search radius around the query point, kilometres.
pub const DEFAULT_RADIUS_KM: f64 = 5.0;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub proximity: ProximityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 5000, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProximityConfig {
    #[serde(default = "default_dataset_path")]
    pub dataset_path: PathBuf,
    #[serde(default = "default_radius_km")]
    pub radius_km: f64,
    #[serde(default = "default_earth_radius_km")]
    pub earth_radius_km: f64,
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self {
            dataset_path: default_dataset_path(),
            radius_km: DEFAULT_RADIUS_KM,
            earth_radius_km: DEFAULT_EARTH_RADIUS_KM,
        }
    }
}

fn default_dataset_path() -> PathBuf { PathBuf::from("data/hospitals.json") }
fn default_radius_km() -> f64 { DEFAULT_RADIUS_KM }
fn default_earth_radius_km() -> f64 { DEFAULT_EARTH_RADIUS_KM }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`), falling back to defaults when the
    /// file is absent, then apply environment overrides and validate.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = match load_default() {
            Ok(cfg) => cfg,
            Err(e) if is_not_found(&e) => AppConfig::default(),
            Err(e) => return Err(e),
        };
        cfg.apply_env_overrides()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup; `apply_env_overrides` feeds it
    /// the process environment.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("SERVER_PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| anyhow!("SERVER_PORT must be an integer in 1..=65535, got {port:?}"))?;
        }
        if let Some(path) = lookup("HOSPITALS_PATH") {
            self.proximity.dataset_path = PathBuf::from(path);
        }
        if let Some(r) = lookup("NEARBY_RADIUS_KM") {
            self.proximity.radius_km = r
                .trim()
                .parse()
                .map_err(|_| anyhow!("NEARBY_RADIUS_KM must be a number, got {r:?}"))?;
        }
        if let Some(r) = lookup("EARTH_RADIUS_KM") {
            self.proximity.earth_radius_km = r
                .trim()
                .parse()
                .map_err(|_| anyhow!("EARTH_RADIUS_KM must be a number, got {r:?}"))?;
        }
        Ok(())
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.proximity.validate()?;
        Ok(())
    }
}

fn is_not_found(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .map(|io| io.kind() == std::io::ErrorKind::NotFound)
        .unwrap_or(false)
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(4),
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl ProximityConfig {
    pub fn validate(&self) -> Result<()> {
        if self.dataset_path.as_os_str().is_empty() {
            return Err(anyhow!("proximity.dataset_path is empty"));
        }
        if !(self.radius_km.is_finite() && self.radius_km > 0.0) {
            return Err(anyhow!("proximity.radius_km must be a positive number"));
        }
        if !(self.earth_radius_km.is_finite() && self.earth_radius_km > 0.0) {
            return Err(anyhow!("proximity.earth_radius_km must be a positive number"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_are_five_km_on_port_5000() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.port, 5000);
        assert_eq!(cfg.proximity.radius_km, 5.0);
        assert_eq!(cfg.proximity.earth_radius_km, 6371.0);
        assert_eq!(cfg.proximity.dataset_path, PathBuf::from("data/hospitals.json"));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = parse(
            r#"
            [server]
            host = "0.0.0.0"
            port = 8080

            [proximity]
            radius_km = 10.0
            "#,
        )
        .expect("parse toml");
        assert_eq!(cfg.server.bind_addr(), "0.0.0.0:8080");
        assert_eq!(cfg.proximity.radius_km, 10.0);
        assert_eq!(cfg.proximity.earth_radius_km, DEFAULT_EARTH_RADIUS_KM);
    }

    #[test]
    fn overrides_win_over_file_values() {
        let vars: HashMap<&str, &str> = [
            ("SERVER_PORT", "9090"),
            ("HOSPITALS_PATH", "/srv/hospitals.json"),
            ("NEARBY_RADIUS_KM", "2.5"),
        ]
        .into_iter()
        .collect();
        let mut cfg = AppConfig::default();
        cfg.apply_overrides(|k| vars.get(k).map(|v| v.to_string()))
            .expect("apply overrides");
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.proximity.dataset_path, PathBuf::from("/srv/hospitals.json"));
        assert_eq!(cfg.proximity.radius_km, 2.5);
    }

    #[test]
    fn bad_override_is_rejected() {
        let mut cfg = AppConfig::default();
        let err = cfg
            .apply_overrides(|k| (k == "NEARBY_RADIUS_KM").then(|| "five".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("NEARBY_RADIUS_KM"));
    }

    #[test]
    fn normalize_repairs_host_and_workers() {
        let mut cfg = AppConfig::default();
        cfg.server.host = "  ".into();
        cfg.server.worker_threads = Some(0);
        cfg.normalize_and_validate().expect("valid");
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.worker_threads, Some(4));
    }

    #[test]
    fn non_positive_radius_is_invalid() {
        let mut cfg = AppConfig::default();
        cfg.proximity.radius_km = 0.0;
        assert!(cfg.normalize_and_validate().is_err());

        let mut cfg = AppConfig::default();
        cfg.proximity.earth_radius_km = f64::NAN;
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn zero_port_is_invalid() {
        let mut cfg = AppConfig::default();
        cfg.server.port = 0;
        assert!(cfg.normalize_and_validate().is_err());
    }
}

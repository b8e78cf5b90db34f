use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_u16(profile: &str, key: &str, default: u16) -> u16 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub server: ServerConfig,
    pub seed: SeedConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `TASKHUB_PROFILE`. When set (e.g. `PROD`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("TASKHUB_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            server: ServerConfig::from_env_profiled(p),
            seed: SeedConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Socket address string the server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!("  server:      host={}, port={}", self.server.host, self.server.port);
        match &self.seed.path {
            Some(path) => tracing::info!("  seed:        path={}", path.display()),
            None => tracing::info!("  seed:        (embedded dataset)"),
        }
    }

    /// Return a view safe for API responses.
    pub fn redacted_summary(&self) -> serde_json::Value {
        serde_json::json!({
            "profile": self.profile_label(),
            "server": { "host": self.server.host, "port": self.server.port },
            "seed": { "path": self.seed.path, "embedded": self.seed.path.is_none() },
        })
    }
}

// ── Server ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            host: profiled_env_or(p, "HOST", "0.0.0.0"),
            port: profiled_env_u16(p, "PORT", 3000),
        }
    }
}

// ── Seed dataset ──────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Alternative seed file. `None` uses the dataset compiled into the binary.
    pub path: Option<PathBuf>,
}

impl SeedConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            path: profiled_env_opt(p, "TASKHUB_SEED_PATH").map(PathBuf::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiled_keys_take_precedence() {
        env::set_var("CFGTEST_PORT", "4100");
        env::set_var("CFGTEST_TASKHUB_SEED_PATH", "/tmp/cfgtest-tasks.json");

        let config = Config::for_profile("cfgtest");
        assert_eq!(config.profile, "CFGTEST");
        assert_eq!(config.profile_label(), "CFGTEST");
        assert_eq!(config.server.port, 4100);
        assert_eq!(
            config.seed.path.as_deref(),
            Some(std::path::Path::new("/tmp/cfgtest-tasks.json"))
        );
        assert!(config.bind_addr().ends_with(":4100"));

        env::remove_var("CFGTEST_PORT");
        env::remove_var("CFGTEST_TASKHUB_SEED_PATH");
    }

    #[test]
    fn unparsable_port_falls_back_to_default() {
        env::set_var("CFGBAD_PORT", "not-a-port");
        let config = Config::for_profile("cfgbad");
        assert_eq!(config.server.port, 3000);
        env::remove_var("CFGBAD_PORT");
    }

    #[test]
    fn redacted_summary_reports_embedded_seed() {
        let config = Config {
            profile: String::new(),
            server: ServerConfig { host: "127.0.0.1".into(), port: 3000 },
            seed: SeedConfig::default(),
        };
        let summary = config.redacted_summary();
        assert_eq!(summary["profile"], "default");
        assert_eq!(summary["seed"]["embedded"], true);
        assert_eq!(summary["server"]["port"], 3000);
    }
}

//! Runtime configuration loaded from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `SPY_CATS_DB_PATH` | platform data directory |
//! | `SPY_CATS_HOST` | `127.0.0.1` |
//! | `SERVER_PORT` | `8080` (`:8080` is accepted too) |
//! | `SPY_CATS_MIGRATIONS_DIR` | `migrations` |
//! | `SPY_CATS_BREED_CHECK` | `remote` (`remote` or `off`) |
//! | `SPY_CATS_BREEDS_URL` | TheCatAPI breed list |
//!
//! The store is an embedded SQLite file, so there are no `DB_HOST`, `DB_PORT`
//! or database credential variables; `SPY_CATS_DB_PATH` replaces them.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::services::breeds::{BreedCatalog, DEFAULT_BREEDS_URL};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MIGRATIONS_DIR: &str = "migrations";

/// How cat breeds are validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BreedCheck {
    Remote { url: String },
    Off,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite file; `None` means the platform data directory.
    pub db_path: Option<PathBuf>,
    pub host: String,
    pub port: u16,
    /// Directory of extra raw `*.sql` migrations, applied if it exists.
    pub migrations_dir: PathBuf,
    pub breed_check: BreedCheck,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("SERVER_PORT") {
            Some(raw) => parse_port(&raw)?,
            None => DEFAULT_PORT,
        };

        let breed_check = match get("SPY_CATS_BREED_CHECK").as_deref().map(str::trim) {
            None | Some("remote") => BreedCheck::Remote {
                url: get("SPY_CATS_BREEDS_URL").unwrap_or_else(|| DEFAULT_BREEDS_URL.to_string()),
            },
            Some("off") => BreedCheck::Off,
            Some(other) => bail!("SPY_CATS_BREED_CHECK must be `remote` or `off`, got `{other}`"),
        };

        Ok(Self {
            db_path: get("SPY_CATS_DB_PATH").map(PathBuf::from),
            host: get("SPY_CATS_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            migrations_dir: get("SPY_CATS_MIGRATIONS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MIGRATIONS_DIR)),
            breed_check,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn breed_catalog(&self) -> Result<BreedCatalog> {
        match &self.breed_check {
            BreedCheck::Remote { url } => BreedCatalog::remote(url.as_str()),
            BreedCheck::Off => Ok(BreedCatalog::Disabled),
        }
    }
}

/// Parse `8080` or `:8080`.
fn parse_port(raw: &str) -> Result<u16> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix(':').unwrap_or(trimmed);
    digits
        .parse()
        .with_context(|| format!("SERVER_PORT must be a port number, got `{raw}`"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config(&[]).unwrap();
        assert!(config.db_path.is_none());
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.migrations_dir, PathBuf::from("migrations"));
        assert_eq!(
            config.breed_check,
            BreedCheck::Remote {
                url: DEFAULT_BREEDS_URL.to_string()
            }
        );
    }

    #[test]
    fn accepts_colon_prefixed_port() {
        let config = config(&[("SERVER_PORT", ":9090")]).unwrap();
        assert_eq!(config.port, 9090);
    }

    #[test]
    fn rejects_malformed_values() {
        assert!(config(&[("SERVER_PORT", "eighty")]).is_err());
        assert!(config(&[("SPY_CATS_BREED_CHECK", "sometimes")]).is_err());
    }

    #[test]
    fn breed_check_can_be_disabled() {
        let config = config(&[("SPY_CATS_BREED_CHECK", "off")]).unwrap();
        assert!(matches!(
            config.breed_catalog().unwrap(),
            BreedCatalog::Disabled
        ));
    }

    #[test]
    fn empty_values_fall_back_to_defaults() {
        let config = config(&[("SPY_CATS_HOST", ""), ("SPY_CATS_DB_PATH", "  ")]).unwrap();
        assert_eq!(config.host, DEFAULT_HOST);
        assert!(config.db_path.is_none());
    }
}

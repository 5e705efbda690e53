use helma_common::error::{HelmaError, HelmaResult};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub backfill_months: u32,
    pub log_level: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    /// Loads `.env` file if present, then reads required vars.
    pub fn from_env() -> HelmaResult<Self> {
        // Best-effort .env load; ignore if missing
        let _ = dotenvy::dotenv();

        Ok(Self {
            database_url: get_var("DATABASE_URL")?,
            backfill_months: get_var_or("BACKFILL_MONTHS", "3")
                .parse()
                .map_err(|e| HelmaError::Config(format!("invalid BACKFILL_MONTHS: {e}")))?,
            log_level: get_var_or("LOG_LEVEL", "info"),
        })
    }
}

fn get_var(key: &str) -> HelmaResult<String> {
    env::var(key).map_err(|_| HelmaError::Config(format!("{key} is required but not set")))
}

fn get_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn config_from_env_succeeds_with_required_vars() {
        let _guard = ENV_LOCK.lock().expect("env lock poisoned");

        env::set_var("DATABASE_URL", "postgres://localhost/helma_test");
        env::remove_var("BACKFILL_MONTHS");

        let cfg = AppConfig::from_env().expect("should parse config");
        assert_eq!(cfg.database_url, "postgres://localhost/helma_test");
        assert_eq!(cfg.backfill_months, 3);
        assert_eq!(cfg.log_level, "info");

        env::remove_var("DATABASE_URL");
    }

    #[test]
    fn config_from_env_fails_without_database_url() {
        let _guard = ENV_LOCK.lock().expect("env lock poisoned");

        env::remove_var("DATABASE_URL");
        let result = AppConfig::from_env();
        assert!(result.is_err());
    }

    #[test]
    fn config_from_env_reads_backfill_months() {
        let _guard = ENV_LOCK.lock().expect("env lock poisoned");

        env::set_var("DATABASE_URL", "postgres://localhost/helma_test");
        env::set_var("BACKFILL_MONTHS", "6");

        let cfg = AppConfig::from_env().expect("should parse config");
        assert_eq!(cfg.backfill_months, 6);

        env::remove_var("DATABASE_URL");
        env::remove_var("BACKFILL_MONTHS");
    }

    #[test]
    fn config_from_env_rejects_bad_backfill_months() {
        let _guard = ENV_LOCK.lock().expect("env lock poisoned");

        env::set_var("DATABASE_URL", "postgres://localhost/helma_test");
        env::set_var("BACKFILL_MONTHS", "soon");

        let result = AppConfig::from_env();
        assert!(result.is_err());

        env::remove_var("DATABASE_URL");
        env::remove_var("BACKFILL_MONTHS");
    }
}

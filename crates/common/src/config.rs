use std::net::SocketAddr;
use std::str::FromStr;

use serde::Deserialize;

/// Goals reserve configured by the original product: a single placeholder
/// amount for "total current cost of goals to set aside".
pub const DEFAULT_GOALS_RESERVE_AMOUNT: f64 = 102_863_884.0;

/// Safe withdrawal rate used when a request omits `swr_percentage`.
pub const DEFAULT_SWR_PERCENTAGE: f64 = 4.0;

/// Owner used when a request does not carry an `X-User-Id` header.
pub const DEFAULT_OWNER_ID: i64 = 1;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5001";

const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost",
    "http://localhost:3000",
    "http://localhost:5173",
];

/// Which record store backs the repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    Postgres,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            other => Err(format!("unknown store backend '{other}'")),
        }
    }
}

/// How the amount set aside for goals is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalsReserveStrategy {
    /// Use `GOALS_RESERVE_AMOUNT` verbatim.
    Fixed,
    /// Sum the target amounts of the owner's goal records.
    Goals,
}

impl FromStr for GoalsReserveStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(GoalsReserveStrategy::Fixed),
            "goals" | "sum-of-goals" | "sum_of_goals" => Ok(GoalsReserveStrategy::Goals),
            other => Err(format!("unknown goals reserve strategy '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

/// Global application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Socket address the HTTP server binds to (default: 0.0.0.0:5001)
    pub bind_addr: SocketAddr,

    /// Record store backend (default: memory)
    pub store_backend: StoreBackend,

    /// PostgreSQL connection string, required for the postgres backend
    pub database_url: Option<String>,

    /// Maximum number of PostgreSQL connections in the pool (default: 20)
    pub db_max_connections: u32,

    /// Load the sample portfolio into an empty in-memory store (default: true)
    pub seed_sample_data: bool,

    /// Owner id assumed when requests carry none (default: 1)
    pub default_owner_id: i64,

    /// Goals reserve strategy (default: fixed)
    pub goals_reserve_strategy: GoalsReserveStrategy,

    /// Fixed goals reserve amount (default: 102863884.0)
    pub goals_reserve_amount: f64,

    /// Withdrawal rate applied when a request omits one (default: 4.0)
    pub default_swr_percentage: f64,

    /// CORS origins; empty means permissive
    pub allowed_origins: Vec<String>,

    /// Log output format (default: pretty)
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 5001)),
            store_backend: StoreBackend::Memory,
            database_url: None,
            db_max_connections: 20,
            seed_sample_data: true,
            default_owner_id: DEFAULT_OWNER_ID,
            goals_reserve_strategy: GoalsReserveStrategy::Fixed,
            goals_reserve_amount: DEFAULT_GOALS_RESERVE_AMOUNT,
            default_swr_percentage: DEFAULT_SWR_PERCENTAGE,
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store_backend: StoreBackend = parse_or(&lookup, "STORE_BACKEND", StoreBackend::Memory)?;
        let database_url = lookup("DATABASE_URL").filter(|s| !s.trim().is_empty());
        if store_backend == StoreBackend::Postgres && database_url.is_none() {
            anyhow::bail!("DATABASE_URL environment variable is required for STORE_BACKEND=postgres");
        }

        let goals_reserve_amount: f64 =
            parse_or(&lookup, "GOALS_RESERVE_AMOUNT", DEFAULT_GOALS_RESERVE_AMOUNT)?;
        if !goals_reserve_amount.is_finite() {
            anyhow::bail!("GOALS_RESERVE_AMOUNT must be a finite number");
        }

        let default_swr_percentage: f64 =
            parse_or(&lookup, "DEFAULT_SWR_PERCENTAGE", DEFAULT_SWR_PERCENTAGE)?;
        if !default_swr_percentage.is_finite() {
            anyhow::bail!("DEFAULT_SWR_PERCENTAGE must be a finite number");
        }

        let allowed_origins = match lookup("ALLOWED_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            None => DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        };

        Ok(Self {
            bind_addr: parse_or(
                &lookup,
                "BIND_ADDR",
                DEFAULT_BIND_ADDR
                    .parse()
                    .map_err(|_| anyhow::anyhow!("invalid built-in bind address"))?,
            )?,
            store_backend,
            database_url,
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 20)?,
            seed_sample_data: parse_bool_or(&lookup, "SEED_SAMPLE_DATA", true)?,
            default_owner_id: parse_or(&lookup, "DEFAULT_OWNER_ID", DEFAULT_OWNER_ID)?,
            goals_reserve_strategy: parse_or(
                &lookup,
                "GOALS_RESERVE_STRATEGY",
                GoalsReserveStrategy::Fixed,
            )?,
            goals_reserve_amount,
            default_swr_percentage,
            allowed_origins,
            log_format: parse_or(&lookup, "LOG_FORMAT", LogFormat::Pretty)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{key} is invalid: {e}")),
        None => Ok(default),
    }
}

fn parse_bool_or<F>(lookup: &F, key: &str, default: bool) -> anyhow::Result<bool>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).as_deref().map(str::trim) {
        None => Ok(default),
        Some("1") | Some("true") | Some("TRUE") | Some("yes") => Ok(true),
        Some("0") | Some("false") | Some("FALSE") | Some("no") => Ok(false),
        Some(other) => Err(anyhow::anyhow!("{key} must be a boolean, got '{other}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.bind_addr.port(), 5001);
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.default_owner_id, 1);
        assert_eq!(config.goals_reserve_strategy, GoalsReserveStrategy::Fixed);
        assert_eq!(config.goals_reserve_amount, 102_863_884.0);
        assert_eq!(config.default_swr_percentage, 4.0);
        assert_eq!(config.allowed_origins.len(), 3);
        assert!(config.seed_sample_data);
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("GOALS_RESERVE_STRATEGY", "goals"),
            ("GOALS_RESERVE_AMOUNT", "250000"),
            ("DEFAULT_SWR_PERCENTAGE", "3.5"),
            ("ALLOWED_ORIGINS", "https://a.example, https://b.example,"),
            ("SEED_SAMPLE_DATA", "false"),
            ("LOG_FORMAT", "json"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.goals_reserve_strategy, GoalsReserveStrategy::Goals);
        assert_eq!(config.goals_reserve_amount, 250_000.0);
        assert_eq!(config.default_swr_percentage, 3.5);
        assert_eq!(
            config.allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert!(!config.seed_sample_data);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_postgres_requires_database_url() {
        let err = AppConfig::from_lookup(lookup_from(&[("STORE_BACKEND", "postgres")]))
            .unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));

        let config = AppConfig::from_lookup(lookup_from(&[
            ("STORE_BACKEND", "postgres"),
            ("DATABASE_URL", "postgres://localhost/finagent"),
        ]))
        .unwrap();
        assert_eq!(config.store_backend, StoreBackend::Postgres);
    }

    #[test]
    fn test_invalid_values_name_the_variable() {
        let err = AppConfig::from_lookup(lookup_from(&[("DB_MAX_CONNECTIONS", "lots")]))
            .unwrap_err();
        assert!(err.to_string().contains("DB_MAX_CONNECTIONS"));

        let err = AppConfig::from_lookup(lookup_from(&[("GOALS_RESERVE_AMOUNT", "inf")]))
            .unwrap_err();
        assert!(err.to_string().contains("GOALS_RESERVE_AMOUNT"));
    }
}

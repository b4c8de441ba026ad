/// Configuration management for Thought Service
///
/// Loaded from environment variables (a `.env` file is honored by `main`).
/// Missing values fall back to defaults; values that are present but do not
/// parse are configuration errors.
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Proximity query defaults and caps
    pub proximity: ProximityConfig,
    /// Thought and comment content rules
    pub content: ContentConfig,
    /// Spatial cloud layout tuning
    pub layout: LayoutSettings,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            env: "development".to_string(),
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins
    pub allowed_origins: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: "http://localhost:3000".to_string(),
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: String,
    /// Max connections in pool
    pub max_connections: u32,
    /// Apply embedded migrations at startup
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgresql://localhost/fisilti".to_string(),
            max_connections: 10,
            run_migrations: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProximityConfig {
    pub default_radius_km: f64,
    pub default_limit: usize,
    /// Requested limits above this are clamped
    pub max_limit: usize,
    /// Upper bound of rows pulled from the bounding box
    pub max_candidates: usize,
    /// Number of latest comments embedded in each thought
    pub comment_preview: usize,
    /// Placeholder distance reported when the viewer has no location
    pub no_location_distance_m: i64,
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self {
            default_radius_km: 10.0,
            default_limit: 20,
            max_limit: 100,
            max_candidates: 1_000,
            comment_preview: 3,
            no_location_distance_m: 1_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    pub max_content_chars: usize,
    pub max_username_chars: usize,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            max_content_chars: 1_000,
            max_username_chars: 32,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutSettings {
    pub min_separation: f64,
    pub attempts_per_strategy: u32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        let defaults = spatial_layout::LayoutConfig::default();
        Self {
            min_separation: defaults.min_separation,
            attempts_per_strategy: defaults.attempts_per_strategy,
        }
    }
}

impl LayoutSettings {
    pub fn to_layout_config(&self) -> spatial_layout::LayoutConfig {
        spatial_layout::LayoutConfig {
            min_separation: self.min_separation,
            attempts_per_strategy: self.attempts_per_strategy,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let is_production = app_env.eq_ignore_ascii_case("production");

        let proximity_defaults = ProximityConfig::default();
        let content_defaults = ContentConfig::default();
        let layout_defaults = LayoutSettings::default();

        let config = Config {
            app: AppConfig {
                env: app_env.clone(),
                host: std::env::var("THOUGHT_SERVICE_HOST")
                    .unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or_default("THOUGHT_SERVICE_PORT", 8080)?,
            },
            cors: {
                let allowed_origins = match std::env::var("CORS_ALLOWED_ORIGINS") {
                    Ok(value) => value,
                    Err(_) if is_production => {
                        return Err("CORS_ALLOWED_ORIGINS must be set in production".to_string())
                    }
                    Err(_) => CorsConfig::default().allowed_origins,
                };

                if is_production && allowed_origins.trim() == "*" {
                    return Err("CORS_ALLOWED_ORIGINS cannot be '*' in production".to_string());
                }

                CorsConfig { allowed_origins }
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| DatabaseConfig::default().url),
                max_connections: parse_env_or_default("DATABASE_MAX_CONNECTIONS", 10)?,
                run_migrations: parse_env_or_default("RUN_MIGRATIONS", true)?,
            },
            proximity: ProximityConfig {
                default_radius_km: parse_env_or_default(
                    "PROXIMITY_DEFAULT_RADIUS_KM",
                    proximity_defaults.default_radius_km,
                )?,
                default_limit: parse_env_or_default(
                    "PROXIMITY_DEFAULT_LIMIT",
                    proximity_defaults.default_limit,
                )?,
                max_limit: parse_env_or_default("PROXIMITY_MAX_LIMIT", proximity_defaults.max_limit)?,
                max_candidates: parse_env_or_default(
                    "PROXIMITY_MAX_CANDIDATES",
                    proximity_defaults.max_candidates,
                )?,
                comment_preview: parse_env_or_default(
                    "PROXIMITY_COMMENT_PREVIEW",
                    proximity_defaults.comment_preview,
                )?,
                no_location_distance_m: parse_env_or_default(
                    "PROXIMITY_NO_LOCATION_DISTANCE_M",
                    proximity_defaults.no_location_distance_m,
                )?,
            },
            content: ContentConfig {
                max_content_chars: parse_env_or_default(
                    "THOUGHT_MAX_CONTENT_CHARS",
                    content_defaults.max_content_chars,
                )?,
                max_username_chars: content_defaults.max_username_chars,
            },
            layout: LayoutSettings {
                min_separation: parse_env_or_default(
                    "LAYOUT_MIN_SEPARATION",
                    layout_defaults.min_separation,
                )?,
                attempts_per_strategy: parse_env_or_default(
                    "LAYOUT_ATTEMPTS_PER_STRATEGY",
                    layout_defaults.attempts_per_strategy,
                )?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), String> {
        let proximity = &self.proximity;
        if !(proximity.default_radius_km.is_finite() && proximity.default_radius_km > 0.0) {
            return Err("PROXIMITY_DEFAULT_RADIUS_KM must be a positive number".to_string());
        }
        if proximity.default_limit == 0 || proximity.max_limit == 0 {
            return Err("PROXIMITY_DEFAULT_LIMIT and PROXIMITY_MAX_LIMIT must be positive".to_string());
        }
        if proximity.max_candidates < proximity.max_limit {
            return Err("PROXIMITY_MAX_CANDIDATES must not be below PROXIMITY_MAX_LIMIT".to_string());
        }
        if self.content.max_content_chars == 0 {
            return Err("THOUGHT_MAX_CONTENT_CHARS must be positive".to_string());
        }
        if !(self.layout.min_separation.is_finite() && self.layout.min_separation >= 0.0) {
            return Err("LAYOUT_MIN_SEPARATION must be a non-negative number".to_string());
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.app.env.eq_ignore_ascii_case("production")
    }
}

fn parse_env_or_default<T>(key: &str, default: T) -> Result<T, String>
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .trim()
            .parse()
            .map_err(|e| format!("Failed to parse {}='{}': {}", key, val, e)),
        Err(_) => Ok(default),
    }
}

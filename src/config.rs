use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::models::MatchRules;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

/// Matching rules as configuration
///
/// Every threshold the matcher uses was a hardcoded business rule in the old
/// platform; here they are tunable without a code change.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_window_days")]
    pub window_days: i64,
    #[serde(default = "default_score_threshold")]
    pub score_threshold: u32,
    #[serde(default = "default_near_distance_km")]
    pub near_distance_km: f64,
    #[serde(default = "default_very_near_distance_km")]
    pub very_near_distance_km: f64,
    #[serde(default)]
    pub points: PointsConfig,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
            score_threshold: default_score_threshold(),
            near_distance_km: default_near_distance_km(),
            very_near_distance_km: default_very_near_distance_km(),
            points: PointsConfig::default(),
        }
    }
}

impl MatchingSettings {
    /// Resolve the configured values into the rules the matcher consumes
    pub fn rules(&self) -> MatchRules {
        MatchRules {
            window_days: self.window_days,
            score_threshold: self.score_threshold,
            species_points: self.points.species,
            size_points: self.points.size,
            color_points: self.points.color,
            near_distance_km: self.near_distance_km,
            near_points: self.points.near,
            very_near_distance_km: self.very_near_distance_km,
            very_near_points: self.points.very_near_bonus,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PointsConfig {
    #[serde(default = "default_species_points")]
    pub species: u32,
    #[serde(default = "default_size_points")]
    pub size: u32,
    #[serde(default = "default_color_points")]
    pub color: u32,
    #[serde(default = "default_near_points")]
    pub near: u32,
    #[serde(default = "default_very_near_bonus")]
    pub very_near_bonus: u32,
}

impl Default for PointsConfig {
    fn default() -> Self {
        Self {
            species: default_species_points(),
            size: default_size_points(),
            color: default_color_points(),
            near: default_near_points(),
            very_near_bonus: default_very_near_bonus(),
        }
    }
}

fn default_window_days() -> i64 { 60 }
fn default_score_threshold() -> u32 { 50 }
fn default_near_distance_km() -> f64 { 10.0 }
fn default_very_near_distance_km() -> f64 { 3.0 }
fn default_species_points() -> u32 { 30 }
fn default_size_points() -> u32 { 20 }
fn default_color_points() -> u32 { 25 }
fn default_near_points() -> u32 { 15 }
fn default_very_near_bonus() -> u32 { 10 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with SOSPETS_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g. SOSPETS__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("SOSPETS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        // The plain DATABASE_URL convention wins over everything else
        let settings = if let Ok(database_url) = std::env::var("DATABASE_URL") {
            Config::builder()
                .add_source(settings)
                .set_override("database.url", database_url)?
                .build()?
        } else {
            settings
        };

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matching_settings_mirror_platform_rules() {
        let matching = MatchingSettings::default();
        let rules = matching.rules();

        assert_eq!(rules.window_days, 60);
        assert_eq!(rules.score_threshold, 50);
        assert_eq!(rules.species_points, 30);
        assert_eq!(rules.size_points, 20);
        assert_eq!(rules.color_points, 25);
        assert_eq!(rules.near_distance_km, 10.0);
        assert_eq!(rules.near_points, 15);
        assert_eq!(rules.very_near_distance_km, 3.0);
        assert_eq!(rules.very_near_points, 10);
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "json");
    }
}

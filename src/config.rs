use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub directory: DirectorySettings,
    pub collection: CollectionSettings,
    #[serde(default)]
    pub session: SessionSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Document-store backend holding user profiles and decisions
#[derive(Debug, Clone, Deserialize)]
pub struct DirectorySettings {
    pub endpoint: String,
    pub api_key: String,
    pub project_id: String,
    pub database_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionSettings {
    pub users: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    #[serde(default = "default_session_ttl")]
    pub ttl_secs: u64,
    #[serde(default = "default_max_sessions")]
    pub max_sessions: u64,
}

fn default_session_ttl() -> u64 { 1800 }
fn default_max_sessions() -> u64 { 10_000 }

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            ttl_secs: default_session_ttl(),
            max_sessions: default_max_sessions(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    /// Delay before the post-decision active candidate is reported, matching
    /// the client's card dismissal animation
    #[serde(default = "default_transition_delay_ms")]
    pub transition_delay_ms: u64,
}

fn default_transition_delay_ms() -> u64 { 300 }

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            transition_delay_ms: default_transition_delay_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringSettings {
    /// Clamp compatibility scores to [0, 100]. Off by default: the score has
    /// always been allowed to go negative for near-antipodal pairs.
    #[serde(default)]
    pub clamp_scores: bool,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self { clamp_scores: false }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with ASTRO_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with ASTRO_)
            // e.g., ASTRO_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("ASTRO")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("ASTRO")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply backend credentials from plain environment variables
///
/// Deployment hands the document-store credentials over as plain env vars
/// rather than the prefixed form, so both spellings work.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let endpoint = env::var("ASTRO_DIRECTORY__ENDPOINT")
        .or_else(|_| env::var("DIRECTORY_ENDPOINT"))
        .ok();
    let api_key = env::var("ASTRO_DIRECTORY__API_KEY")
        .or_else(|_| env::var("DIRECTORY_API_KEY"))
        .ok();
    let project_id = env::var("ASTRO_DIRECTORY__PROJECT_ID")
        .or_else(|_| env::var("DIRECTORY_PROJECT_ID"))
        .ok();
    let database_id = env::var("ASTRO_DIRECTORY__DATABASE_ID")
        .or_else(|_| env::var("DIRECTORY_DATABASE_ID"))
        .ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(endpoint) = endpoint {
        builder = builder.set_override("directory.endpoint", endpoint)?;
    }
    if let Some(api_key) = api_key {
        builder = builder.set_override("directory.api_key", api_key)?;
    }
    if let Some(project_id) = project_id {
        builder = builder.set_override("directory.project_id", project_id)?;
    }
    if let Some(database_id) = database_id {
        builder = builder.set_override("directory.database_id", database_id)?;
    }

    builder.build()
}

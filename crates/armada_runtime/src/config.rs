//! # Bot Configuration
//!
//! Loaded once at startup from a TOML file, then patched from the
//! environment:
//!
//! ```toml
//! [bot]
//! name = "Walls"
//! version = "1.0"
//! authors = ["Jane Doe"]
//!
//! [server]
//! url = "localhost:7654"
//!
//! [limits]
//! max_speed = 6.0
//! ```
//!
//! | variable        | overrides          |
//! |-----------------|--------------------|
//! | `SERVER_URL`    | `server.url`       |
//! | `SERVER_SECRET` | `server.secret`    |
//! | `BOT_NAME`      | `bot.name`         |
//! | `BOT_VERSION`   | `bot.version`      |
//! | `BOT_AUTHORS`   | `bot.authors` (comma separated) |

use std::path::Path;

use armada_core::constants::{
    ACCELERATION, DECELERATION, MAX_EVENT_AGE, MAX_GUN_TURN_RATE, MAX_QUEUE_SIZE,
    MAX_RADAR_TURN_RATE, MAX_SPEED, MAX_TURN_RATE,
};
use armada_core::{Limits, MovementPlanner};
use armada_protocol::BotHandshake;
use serde::Deserialize;

use crate::error::{BotError, BotResult};

/// Complete bot configuration.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Identity sent in the handshake.
    pub bot: BotInfo,
    /// Where to connect.
    pub server: ServerConfig,
    /// Per-bot speed and turn caps.
    pub limits: LimitsConfig,
    /// Event buffering.
    pub events: EventsConfig,
    /// Physics used by the movement planner.
    pub physics: PhysicsConfig,
}

/// Bot identity.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct BotInfo {
    /// Display name.
    pub name: String,
    /// Version string.
    pub version: String,
    /// Authors.
    pub authors: Vec<String>,
    /// Short description.
    pub description: Option<String>,
    /// Homepage URL.
    pub homepage: Option<String>,
    /// ISO country codes.
    pub country_codes: Vec<String>,
    /// Game types the bot can play.
    pub game_types: Vec<String>,
    /// Runtime platform.
    pub platform: Option<String>,
    /// Language the bot is written in.
    pub programming_lang: Option<String>,
}

impl Default for BotInfo {
    fn default() -> Self {
        Self {
            name: "Unnamed".to_string(),
            version: "0.1.0".to_string(),
            authors: vec!["Unknown".to_string()],
            description: None,
            homepage: None,
            country_codes: Vec::new(),
            game_types: vec!["classic".to_string(), "melee".to_string(), "1v1".to_string()],
            platform: Some("Rust".to_string()),
            programming_lang: Some("Rust".to_string()),
        }
    }
}

/// Server connection settings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// `host:port` of the game server.
    pub url: String,
    /// Shared secret, if the server requires one.
    pub secret: Option<String>,
    /// Capacity of the outbound message queue.
    pub outbox_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: "localhost:7654".to_string(),
            secret: None,
            outbox_capacity: 64,
        }
    }
}

/// Per-bot caps, never above the arena maxima.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Speed cap.
    pub max_speed: f64,
    /// Body turn-rate cap.
    pub max_turn_rate: f64,
    /// Gun turn-rate cap.
    pub max_gun_turn_rate: f64,
    /// Radar turn-rate cap.
    pub max_radar_turn_rate: f64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_speed: MAX_SPEED,
            max_turn_rate: MAX_TURN_RATE,
            max_gun_turn_rate: MAX_GUN_TURN_RATE,
            max_radar_turn_rate: MAX_RADAR_TURN_RATE,
        }
    }
}

/// Event buffering settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EventsConfig {
    /// Buffered events before new ones are dropped.
    pub max_queue_size: usize,
    /// Turns a non-critical event may wait before it is evicted.
    pub max_event_age: i32,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            max_queue_size: MAX_QUEUE_SIZE,
            max_event_age: MAX_EVENT_AGE,
        }
    }
}

/// Physics used by the movement planner.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Speed gained per turn.
    pub acceleration: f64,
    /// Speed lost per turn when braking (negative by convention).
    pub deceleration: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            acceleration: ACCELERATION,
            deceleration: DECELERATION,
        }
    }
}

impl BotConfig {
    /// Loads a config file, applies environment overrides and validates.
    ///
    /// # Errors
    ///
    /// [`BotError::Io`] if the file cannot be read, [`BotError::Config`]
    /// if it does not parse or fails validation.
    pub fn load(path: impl AsRef<Path>) -> BotResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&text)?;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Parses TOML text. Missing sections take their defaults.
    ///
    /// # Errors
    ///
    /// [`BotError::Config`] on malformed TOML.
    pub fn from_toml_str(text: &str) -> BotResult<Self> {
        toml::from_str(text).map_err(|e| BotError::Config(e.to_string()))
    }

    /// Applies overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Applies overrides from an arbitrary lookup.
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("SERVER_URL") {
            self.server.url = url;
        }
        if let Some(secret) = lookup("SERVER_SECRET") {
            self.server.secret = Some(secret);
        }
        if let Some(name) = lookup("BOT_NAME") {
            self.bot.name = name;
        }
        if let Some(version) = lookup("BOT_VERSION") {
            self.bot.version = version;
        }
        if let Some(authors) = lookup("BOT_AUTHORS") {
            self.bot.authors = authors
                .split(',')
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(str::to_string)
                .collect();
        }
    }

    /// Checks that the configuration is usable.
    ///
    /// # Errors
    ///
    /// [`BotError::Config`] naming the first offending field.
    pub fn validate(&self) -> BotResult<()> {
        let fail = |msg: &str| Err(BotError::Config(msg.to_string()));
        if self.bot.name.trim().is_empty() {
            return fail("bot.name must not be empty");
        }
        if self.bot.version.trim().is_empty() {
            return fail("bot.version must not be empty");
        }
        if self.bot.authors.is_empty() {
            return fail("bot.authors must list at least one author");
        }
        if self.server.url.trim().is_empty() {
            return fail("server.url must not be empty");
        }
        if self.server.outbox_capacity == 0 {
            return fail("server.outbox_capacity must be positive");
        }
        let limits = &self.limits;
        for (name, value) in [
            ("limits.max_speed", limits.max_speed),
            ("limits.max_turn_rate", limits.max_turn_rate),
            ("limits.max_gun_turn_rate", limits.max_gun_turn_rate),
            ("limits.max_radar_turn_rate", limits.max_radar_turn_rate),
        ] {
            if value.is_nan() || value <= 0.0 {
                return Err(BotError::Config(format!("{name} must be positive, got {value}")));
            }
        }
        if self.events.max_queue_size == 0 {
            return fail("events.max_queue_size must be positive");
        }
        if self.events.max_event_age < 0 {
            return fail("events.max_event_age must not be negative");
        }
        let physics = &self.physics;
        if physics.acceleration.is_nan() || physics.acceleration <= 0.0 {
            return fail("physics.acceleration must be positive");
        }
        if physics.deceleration.is_nan() || physics.deceleration == 0.0 {
            return fail("physics.deceleration must be non-zero");
        }
        Ok(())
    }

    /// Limits as applied to the intent, clamped to the arena maxima.
    #[must_use]
    pub fn limits(&self) -> Limits {
        Limits::new(
            self.limits.max_speed,
            self.limits.max_turn_rate,
            self.limits.max_gun_turn_rate,
            self.limits.max_radar_turn_rate,
        )
    }

    /// Planner for this bot's physics and speed cap.
    #[must_use]
    pub fn planner(&self) -> MovementPlanner {
        MovementPlanner::new(
            self.physics.acceleration,
            self.physics.deceleration,
            self.limits().max_speed(),
        )
    }

    /// Handshake answering a server greeting.
    #[must_use]
    pub fn handshake(&self, session_id: &str) -> BotHandshake {
        let bot = &self.bot;
        BotHandshake {
            session_id: session_id.to_string(),
            name: bot.name.clone(),
            version: bot.version.clone(),
            authors: bot.authors.clone(),
            description: bot.description.clone(),
            homepage: bot.homepage.clone(),
            country_codes: bot.country_codes.clone(),
            game_types: bot.game_types.clone(),
            platform: bot.platform.clone(),
            programming_lang: bot.programming_lang.clone(),
            secret: self.server.secret.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = BotConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.events.max_queue_size, 256);
        assert_eq!(config.events.max_event_age, 2);
        assert_eq!(config.limits().max_speed(), 8.0);
    }

    #[test]
    fn test_partial_toml() {
        let config = BotConfig::from_toml_str(
            r#"
            [bot]
            name = "Walls"
            authors = ["A", "B"]

            [limits]
            max_speed = 5.0
            "#,
        )
        .unwrap();
        assert_eq!(config.bot.name, "Walls");
        assert_eq!(config.bot.version, "0.1.0");
        assert_eq!(config.bot.authors, vec!["A", "B"]);
        assert_eq!(config.limits.max_speed, 5.0);
        assert_eq!(config.limits.max_turn_rate, 10.0);
        assert_eq!(config.planner().max_speed(), 5.0);
    }

    #[test]
    fn test_limits_clamped_to_arena() {
        let config = BotConfig::from_toml_str("[limits]\nmax_speed = 50.0").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.limits().max_speed(), 8.0);
    }

    #[test]
    fn test_malformed_toml() {
        let err = BotConfig::from_toml_str("[bot\nname = 1").unwrap_err();
        assert!(matches!(err, BotError::Config(_)));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("SERVER_URL", "example.org:9000"),
            ("SERVER_SECRET", "s3cret"),
            ("BOT_NAME", "Corners"),
            ("BOT_AUTHORS", "Ann, Bob ,"),
        ]
        .into_iter()
        .collect();
        let mut config = BotConfig::default();
        config.apply_env_from(|key| env.get(key).map(|v| (*v).to_string()));

        assert_eq!(config.server.url, "example.org:9000");
        assert_eq!(config.server.secret.as_deref(), Some("s3cret"));
        assert_eq!(config.bot.name, "Corners");
        assert_eq!(config.bot.version, "0.1.0");
        assert_eq!(config.bot.authors, vec!["Ann", "Bob"]);
    }

    #[test]
    fn test_validation_failures() {
        let mut config = BotConfig::default();
        config.bot.name = "  ".to_string();
        assert!(matches!(config.validate(), Err(BotError::Config(_))));

        let mut config = BotConfig::default();
        config.limits.max_turn_rate = 0.0;
        assert!(matches!(config.validate(), Err(BotError::Config(msg)) if msg.contains("max_turn_rate")));

        let mut config = BotConfig::default();
        config.events.max_queue_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[bot]\nname = \"FromFile\"\nversion = \"2.0\"").unwrap();
        let config = BotConfig::load(file.path()).unwrap();
        assert_eq!(config.bot.version, "2.0");

        let missing = BotConfig::load(file.path().with_extension("missing"));
        assert!(matches!(missing, Err(BotError::Io(_))));
    }

    #[test]
    fn test_handshake_carries_identity() {
        let mut config = BotConfig::default();
        config.server.secret = Some("abc".to_string());
        let handshake = config.handshake("session-1");
        assert_eq!(handshake.session_id, "session-1");
        assert_eq!(handshake.name, "Unnamed");
        assert_eq!(handshake.secret.as_deref(), Some("abc"));
    }
}

//! Top-level frames exchanged with the game server.
//!
//! Every frame is a JSON object whose `type` field names the message.
//!
//! ```text
//!   server                         bot
//!     │── ServerHandshake ──────────▶│
//!     │◀──────────────── BotHandshake │
//!     │── GameStartedEventForBot ───▶│
//!     │◀──────────────────── BotReady │
//!     │── RoundStartedEvent ────────▶│
//!     │── TickEventForBot ──────────▶│  ┐
//!     │◀─────────────────── BotIntent │  ┘ once per turn
//!     │── RoundEndedEventForBot ────▶│
//!     │── GameEndedEventForBot ─────▶│
//! ```

use armada_core::{Color, IntentSnapshot};
use serde::{Deserialize, Serialize};

use crate::events::{BulletState, SkippedTurnEvent, WireEvent};

// =============================================================================
// INBOUND
// =============================================================================

/// Frames sent by the server to a bot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InboundMessage {
    /// First frame after connecting.
    ServerHandshake(ServerHandshake),
    /// A game this bot takes part in has started.
    GameStartedEventForBot(GameStartedEventForBot),
    /// State of one completed turn.
    TickEventForBot(TickEventForBot),
    /// A new round has started.
    RoundStartedEvent(RoundStartedEvent),
    /// The current round is over.
    RoundEndedEventForBot(RoundEndedEventForBot),
    /// The game is over.
    GameEndedEventForBot(GameEndedEventForBot),
    /// The game was aborted by the server.
    GameAbortedEvent,
    /// The bot missed the deadline for a turn.
    SkippedTurnEvent(SkippedTurnEvent),
    /// Any frame type this runtime does not handle.
    #[serde(other)]
    Unknown,
}

impl InboundMessage {
    /// Short name used in logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ServerHandshake(_) => "ServerHandshake",
            Self::GameStartedEventForBot(_) => "GameStartedEventForBot",
            Self::TickEventForBot(_) => "TickEventForBot",
            Self::RoundStartedEvent(_) => "RoundStartedEvent",
            Self::RoundEndedEventForBot(_) => "RoundEndedEventForBot",
            Self::GameEndedEventForBot(_) => "GameEndedEventForBot",
            Self::GameAbortedEvent => "GameAbortedEvent",
            Self::SkippedTurnEvent(_) => "SkippedTurnEvent",
            Self::Unknown => "Unknown",
        }
    }
}

/// Server greeting, answered with a [`BotHandshake`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerHandshake {
    /// Session id to echo back in the bot handshake.
    pub session_id: String,
    /// Server name.
    pub name: Option<String>,
    /// Server variant.
    pub variant: String,
    /// Server version.
    pub version: String,
    /// Game types the server offers.
    pub game_types: Vec<String>,
}

/// Fixed parameters of a game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameSetup {
    /// Game type, e.g. `classic` or `melee`.
    pub game_type: String,
    /// Arena width in units.
    pub arena_width: u32,
    /// Arena height in units.
    pub arena_height: u32,
    /// Rounds in the game.
    pub number_of_rounds: u32,
    /// Gun heat removed per turn.
    pub gun_cooling_rate: f64,
    /// Turns without damage before inactivity penalties start.
    pub max_inactivity_turns: u32,
    /// Time a bot has to send its intent, in microseconds.
    pub turn_timeout: u64,
    /// Time a bot has to answer with `BotReady`, in microseconds.
    pub ready_timeout: u64,
}

impl Default for GameSetup {
    fn default() -> Self {
        Self {
            game_type: "classic".to_string(),
            arena_width: 800,
            arena_height: 600,
            number_of_rounds: 10,
            gun_cooling_rate: 0.1,
            max_inactivity_turns: 450,
            turn_timeout: 30_000,
            ready_timeout: 1_000_000,
        }
    }
}

/// Game start, carrying this bot's id.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameStartedEventForBot {
    /// Id assigned to this bot for the whole game.
    pub my_id: i32,
    /// Game parameters.
    pub game_setup: GameSetup,
}

/// The bot's own state at the end of a turn.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BotState {
    /// Energy left. Zero means disabled.
    pub energy: f64,
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Body heading in degrees.
    pub direction: f64,
    /// Gun heading in degrees.
    pub gun_direction: f64,
    /// Radar heading in degrees.
    pub radar_direction: f64,
    /// Radar sweep angle covered this turn.
    pub radar_sweep: f64,
    /// Speed achieved this turn.
    pub speed: f64,
    /// Body turn rate applied this turn.
    pub turn_rate: f64,
    /// Gun turn rate applied this turn.
    pub gun_turn_rate: f64,
    /// Radar turn rate applied this turn.
    pub radar_turn_rate: f64,
    /// Gun heat. The gun fires only at zero.
    pub gun_heat: f64,
    /// Opponents still alive.
    pub enemy_count: u32,
}

/// State of one completed turn.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TickEventForBot {
    /// Turn number, starting at 1 each round.
    pub turn_number: i32,
    /// Round number, starting at 1.
    pub round_number: i32,
    /// This bot's state.
    pub bot_state: BotState,
    /// Bullets fired by this bot still in flight.
    pub bullet_states: Vec<BulletState>,
    /// Events that happened during the turn.
    pub events: Vec<WireEvent>,
}

/// Round start.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoundStartedEvent {
    /// Round number, starting at 1.
    pub round_number: i32,
}

/// Scores of this bot.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BotResults {
    /// Final placement.
    pub rank: u32,
    /// Survival score.
    pub survival: f64,
    /// Bonus for being the last bot alive.
    pub last_survivor_bonus: f64,
    /// Damage dealt by bullets.
    pub bullet_damage: f64,
    /// Bonus for bullet kills.
    pub bullet_kill_bonus: f64,
    /// Damage dealt by ramming.
    pub ram_damage: f64,
    /// Bonus for ram kills.
    pub ram_kill_bonus: f64,
    /// Sum of all scores.
    pub total_score: f64,
    /// Rounds won.
    pub first_places: u32,
    /// Rounds finished second.
    pub second_places: u32,
    /// Rounds finished third.
    pub third_places: u32,
}

/// Round end with the results so far.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoundEndedEventForBot {
    /// Round that ended.
    pub round_number: i32,
    /// Last turn of the round.
    pub turn_number: i32,
    /// Accumulated results.
    pub results: BotResults,
}

/// Game end with the final results.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameEndedEventForBot {
    /// Rounds played.
    pub number_of_rounds: u32,
    /// Final results.
    pub results: BotResults,
}

// =============================================================================
// OUTBOUND
// =============================================================================

/// Frames sent by a bot to the server.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OutboundMessage {
    /// Answer to [`ServerHandshake`].
    BotHandshake(BotHandshake),
    /// Ready to play the started game.
    BotReady,
    /// Requested actions for the next turn.
    BotIntent(BotIntent),
}

impl OutboundMessage {
    /// Short name used in logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::BotHandshake(_) => "BotHandshake",
            Self::BotReady => "BotReady",
            Self::BotIntent(_) => "BotIntent",
        }
    }
}

/// Bot identity sent once per connection.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BotHandshake {
    /// Session id from the server handshake.
    pub session_id: String,
    /// Bot name.
    pub name: String,
    /// Bot version.
    pub version: String,
    /// Bot authors.
    pub authors: Vec<String>,
    /// Short description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Homepage URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    /// ISO country codes.
    pub country_codes: Vec<String>,
    /// Game types the bot can play.
    pub game_types: Vec<String>,
    /// Runtime platform.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    /// Language the bot is written in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub programming_lang: Option<String>,
    /// Shared secret for servers that require one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}

/// One turn's requested actions, already clamped.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BotIntent {
    /// Body turn rate.
    pub turn_rate: f64,
    /// Gun turn rate.
    pub gun_turn_rate: f64,
    /// Radar turn rate.
    pub radar_turn_rate: f64,
    /// Target speed.
    pub target_speed: f64,
    /// Fire power, absent when not firing.
    #[serde(rename = "firepower", skip_serializing_if = "Option::is_none")]
    pub fire_power: Option<f64>,
    /// Gun compensates body rotation.
    pub adjust_gun_for_body_turn: bool,
    /// Radar compensates body rotation.
    pub adjust_radar_for_body_turn: bool,
    /// Radar compensates gun rotation.
    pub adjust_radar_for_gun_turn: bool,
    /// Rescan with the current radar sweep.
    pub rescan: bool,
    /// Body color as `#RRGGBB`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_color: Option<String>,
    /// Turret color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turret_color: Option<String>,
    /// Radar color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radar_color: Option<String>,
    /// Bullet color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bullet_color: Option<String>,
    /// Scan arc color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_color: Option<String>,
    /// Tracks color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracks_color: Option<String>,
}

impl From<&IntentSnapshot> for BotIntent {
    fn from(snapshot: &IntentSnapshot) -> Self {
        let hex = |color: Option<Color>| color.map(Color::to_hex);
        let colors = &snapshot.colors;
        Self {
            turn_rate: snapshot.turn_rate,
            gun_turn_rate: snapshot.gun_turn_rate,
            radar_turn_rate: snapshot.radar_turn_rate,
            target_speed: snapshot.target_speed,
            fire_power: snapshot.fire_power,
            adjust_gun_for_body_turn: snapshot.adjust_gun_for_body_turn,
            adjust_radar_for_body_turn: snapshot.adjust_radar_for_body_turn,
            adjust_radar_for_gun_turn: snapshot.adjust_radar_for_gun_turn,
            rescan: snapshot.rescan,
            body_color: hex(colors.body),
            turret_color: hex(colors.turret),
            radar_color: hex(colors.radar),
            bullet_color: hex(colors.bullet),
            scan_color: hex(colors.scan),
            tracks_color: hex(colors.tracks),
        }
    }
}

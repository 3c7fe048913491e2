//! JSON text codec.
//!
//! One frame is one JSON object. Framing (newlines, websocket messages) is
//! the transport's business.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ProtocolError, ProtocolResult};
use crate::messages::{InboundMessage, OutboundMessage};

/// Decodes a frame received by a bot.
///
/// # Errors
///
/// Returns [`ProtocolError::Decode`] for malformed JSON or a missing `type`.
pub fn decode_inbound(text: &str) -> ProtocolResult<InboundMessage> {
    decode(text)
}

/// Encodes a frame sent by a bot.
///
/// # Errors
///
/// Returns [`ProtocolError::Encode`] if serialization fails.
pub fn encode_outbound(message: &OutboundMessage) -> ProtocolResult<String> {
    encode(message, message.kind())
}

/// Encodes a server frame. Used by in-process servers.
///
/// # Errors
///
/// Returns [`ProtocolError::Encode`] if serialization fails.
pub fn encode_inbound(message: &InboundMessage) -> ProtocolResult<String> {
    encode(message, message.kind())
}

/// Decodes a bot frame. Used by in-process servers.
///
/// # Errors
///
/// Returns [`ProtocolError::Decode`] for malformed JSON or a missing `type`.
pub fn decode_outbound(text: &str) -> ProtocolResult<OutboundMessage> {
    decode(text)
}

fn decode<T: DeserializeOwned>(text: &str) -> ProtocolResult<T> {
    serde_json::from_str(text.trim()).map_err(ProtocolError::Decode)
}

fn encode<T: Serialize>(message: &T, kind: &'static str) -> ProtocolResult<String> {
    serde_json::to_string(message).map_err(|source| ProtocolError::Encode { kind, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::WireEvent;
    use crate::messages::BotIntent;

    #[test]
    fn test_decode_tick() {
        let text = r#"{
            "type": "TickEventForBot",
            "turnNumber": 7,
            "roundNumber": 2,
            "botState": { "energy": 97.5, "x": 10, "y": 20, "direction": 90,
                          "gunDirection": 90, "radarDirection": 45, "speed": 3,
                          "gunHeat": 0.4, "enemyCount": 1 },
            "bulletStates": [],
            "events": [
                { "type": "BotHitWallEvent", "turnNumber": 7, "victimId": 1 },
                { "type": "ScannedBotEvent", "turnNumber": 7, "scannedByBotId": 1,
                  "scannedBotId": 2, "energy": 50, "x": 1, "y": 2, "direction": 0, "speed": 0 },
                { "type": "TeamMessageEvent", "turnNumber": 7 }
            ]
        }"#;
        let InboundMessage::TickEventForBot(tick) = decode_inbound(text).unwrap() else {
            panic!("expected a tick");
        };
        assert_eq!(tick.turn_number, 7);
        assert_eq!(tick.round_number, 2);
        assert_eq!(tick.bot_state.gun_heat, 0.4);
        assert_eq!(tick.bot_state.enemy_count, 1);
        assert_eq!(tick.events.len(), 3);
        assert!(matches!(tick.events[0], WireEvent::BotHitWallEvent(_)));
        assert!(matches!(tick.events[1], WireEvent::ScannedBotEvent(ref e) if e.scanned_bot_id == 2));
        assert_eq!(tick.events[2], WireEvent::Unknown);
        assert_eq!(tick.events[2].turn_number(), None);
    }

    #[test]
    fn test_decode_handshake_and_unknown() {
        let handshake = decode_inbound(r#"{"type":"ServerHandshake","sessionId":"abc","version":"1.0"}"#).unwrap();
        assert!(matches!(handshake, InboundMessage::ServerHandshake(ref h) if h.session_id == "abc"));

        let aborted = decode_inbound(r#"{"type":"GameAbortedEvent"}"#).unwrap();
        assert_eq!(aborted, InboundMessage::GameAbortedEvent);

        let unknown = decode_inbound(r#"{"type":"TeamMessageEvent","turnNumber":3}"#).unwrap();
        assert_eq!(unknown, InboundMessage::Unknown);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(decode_inbound("not json"), Err(ProtocolError::Decode(_))));
        assert!(matches!(decode_inbound(r#"{"turnNumber":1}"#), Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn test_encode_intent_field_names() {
        let intent = BotIntent {
            target_speed: 4.0,
            fire_power: Some(3.0),
            rescan: true,
            ..BotIntent::default()
        };
        let text = encode_outbound(&OutboundMessage::BotIntent(intent)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["type"], "BotIntent");
        assert_eq!(value["targetSpeed"], 4.0);
        assert_eq!(value["firepower"], 3.0);
        assert_eq!(value["rescan"], true);
        assert!(value.get("bodyColor").is_none());
    }

    #[test]
    fn test_bot_ready_is_bare_type() {
        let text = encode_outbound(&OutboundMessage::BotReady).unwrap();
        assert_eq!(text, r#"{"type":"BotReady"}"#);
        assert_eq!(decode_outbound(&text).unwrap(), OutboundMessage::BotReady);
    }
}

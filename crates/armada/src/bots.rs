//! Sample bots.

use tracing::debug;

use crate::prelude::*;

/// Hugs the walls, gun pointed at the arena center.
///
/// Fires at anything the radar sees and backs off from bots it runs into.
#[derive(Debug, Default)]
pub struct Walls {
    /// Rescan from the scan handler while moving along a wall.
    peek: bool,
    move_amount: f64,
}

impl Walls {
    /// Creates the bot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Bot for Walls {
    fn run(ctx: &mut BotContext<Self>) -> BotResult<()> {
        ctx.set_colors(Colors {
            body: Some(Color::rgb(0x00, 0x00, 0x00)),
            turret: Some(Color::rgb(0x00, 0x00, 0x00)),
            radar: Some(Color::rgb(0xFF, 0xA5, 0x00)),
            bullet: Some(Color::rgb(0x00, 0xFF, 0xFF)),
            scan: Some(Color::rgb(0x00, 0xFF, 0xFF)),
            tracks: None,
        });

        let setup = ctx.game_setup();
        let move_amount = f64::from(setup.arena_width.max(setup.arena_height));
        let bot = ctx.bot_mut();
        bot.move_amount = move_amount;
        bot.peek = false;

        // Face a wall, drive up to it, then put the gun towards the middle.
        let heading = ctx.direction();
        ctx.turn_right(heading % 90.0)?;
        ctx.forward(move_amount)?;
        ctx.bot_mut().peek = true;
        ctx.turn_gun_right(90.0)?;
        ctx.turn_right(90.0)?;

        while ctx.is_running() {
            let move_amount = ctx.bot().move_amount;
            ctx.bot_mut().peek = true;
            ctx.forward(move_amount)?;
            ctx.bot_mut().peek = false;
            ctx.turn_right(90.0)?;
        }
        Ok(())
    }

    fn on_hit_bot(ctx: &mut BotContext<Self>, event: &BotHitBotEvent) -> HandlerResult {
        let bearing = bearing_to(ctx.direction(), ctx.x(), ctx.y(), event.x, event.y);
        debug!(bot = event.victim_id, bearing, "ran into a bot");
        if bearing.abs() < 90.0 {
            ctx.back(100.0)?;
        } else {
            ctx.forward(100.0)?;
        }
        Ok(())
    }

    fn on_scanned_bot(ctx: &mut BotContext<Self>, _event: &ScannedBotEvent) -> HandlerResult {
        ctx.fire(2.0)?;
        if ctx.bot().peek {
            ctx.scan()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use armada_protocol::{
        decode_outbound, encode_inbound, BotState, InboundMessage, OutboundMessage,
        ServerHandshake, TickEventForBot,
    };
    use armada_runtime::channel_transport;
    use std::time::Duration;

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[test]
    fn test_shipped_config_is_valid() {
        let config = BotConfig::from_toml_str(include_str!("../walls.toml")).unwrap();
        config.validate().unwrap();
        assert_eq!(config.bot.name, "Walls");
    }

    #[test]
    fn test_walls_first_turn_squares_up_to_a_wall() {
        let (reader, writer, server) = channel_transport();
        let handle = std::thread::spawn(move || {
            Connection::new("test://walls", reader, writer).run(Walls::new(), BotConfig::default())
        });
        let send = |message: InboundMessage| server.to_bot.send(encode_inbound(&message).unwrap()).unwrap();
        let recv = || decode_outbound(&server.from_bot.recv_timeout(TIMEOUT).unwrap()).unwrap();

        send(InboundMessage::ServerHandshake(ServerHandshake::default()));
        assert!(matches!(recv(), OutboundMessage::BotHandshake(_)));
        send(InboundMessage::GameStartedEventForBot(GameStartedEventForBot {
            my_id: 1,
            game_setup: GameSetup::default(),
        }));
        assert_eq!(recv(), OutboundMessage::BotReady);
        send(InboundMessage::RoundStartedEvent(RoundStartedEvent { round_number: 1 }));
        send(InboundMessage::TickEventForBot(TickEventForBot {
            turn_number: 1,
            round_number: 1,
            bot_state: BotState {
                energy: 100.0,
                x: 400.0,
                y: 300.0,
                direction: 30.0,
                gun_direction: 30.0,
                radar_direction: 30.0,
                ..BotState::default()
            },
            ..TickEventForBot::default()
        }));

        let OutboundMessage::BotIntent(intent) = recv() else {
            panic!("expected an intent");
        };
        // 30 degrees right, clamped to the body turn rate.
        assert_eq!(intent.turn_rate, -10.0);
        assert_eq!(intent.target_speed, 0.0);
        assert_eq!(intent.body_color.as_deref(), Some("#000000"));

        drop(server);
        let bot = handle.join().unwrap().unwrap();
        assert!(bot.is_some());
    }
}

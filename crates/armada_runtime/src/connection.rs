//! # Connection Shell
//!
//! Moves text frames between a transport and a [`BotRuntime`]:
//!
//! ```text
//!   transport ──read_frame──▶ decode ──▶ BotRuntime::handle_message
//!                                              │ (outbox, bounded)
//!   transport ◀──write_frame── encode ◀── armada-writer thread
//! ```
//!
//! The read loop runs on the caller's thread and is the network path. The
//! writer drains the outbox on its own thread so that neither the network
//! path nor the bot-logic thread ever blocks on a socket write.
//!
//! Transports are pluggable through [`FrameReader`] and [`FrameWriter`].
//! Two are provided: newline-delimited JSON over TCP ([`connect_tcp`]) and
//! an in-process pair of channels ([`channel_transport`]).

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpStream;
use std::thread;

use armada_protocol::{decode_inbound, encode_outbound, OutboundMessage};
use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use tracing::{debug, error, info, trace, warn};

use crate::bot::Bot;
use crate::config::BotConfig;
use crate::error::{BotError, BotResult};
use crate::runtime::BotRuntime;

// =============================================================================
// TRANSPORT SEAMS
// =============================================================================

/// Source of inbound text frames.
pub trait FrameReader: Send {
    /// Blocks for the next frame. `Ok(None)` means the peer closed.
    ///
    /// # Errors
    ///
    /// Transport failures.
    fn read_frame(&mut self) -> BotResult<Option<String>>;
}

/// Sink for outbound text frames.
pub trait FrameWriter: Send {
    /// Writes one whole frame.
    ///
    /// # Errors
    ///
    /// Transport failures.
    fn write_frame(&mut self, frame: &str) -> BotResult<()>;
}

// =============================================================================
// LINE TRANSPORT
// =============================================================================

/// Reads one frame per line. Blank lines are skipped.
#[derive(Debug)]
pub struct LineReader<R> {
    inner: BufReader<R>,
    line: String,
}

impl<R: Read> LineReader<R> {
    /// Creates a reader over `inner`.
    #[must_use]
    pub fn new(inner: R) -> Self {
        Self {
            inner: BufReader::new(inner),
            line: String::new(),
        }
    }
}

impl<R: Read + Send> FrameReader for LineReader<R> {
    fn read_frame(&mut self) -> BotResult<Option<String>> {
        loop {
            self.line.clear();
            if self.inner.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            let frame = self.line.trim_end_matches(['\r', '\n']);
            if !frame.is_empty() {
                return Ok(Some(frame.to_string()));
            }
        }
    }
}

/// Writes one frame per line and flushes after each.
#[derive(Debug)]
pub struct LineWriter<W> {
    inner: W,
}

impl<W: Write> LineWriter<W> {
    /// Creates a writer over `inner`.
    #[must_use]
    pub fn new(inner: W) -> Self {
        Self { inner }
    }
}

impl<W: Write + Send> FrameWriter for LineWriter<W> {
    fn write_frame(&mut self, frame: &str) -> BotResult<()> {
        self.inner.write_all(frame.as_bytes())?;
        self.inner.write_all(b"\n")?;
        self.inner.flush()?;
        Ok(())
    }
}

/// `host:port` part of a server URL. Accepts `ws://`, `tcp://` or a bare
/// address; any path is dropped.
#[must_use]
pub fn socket_address(url: &str) -> &str {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    rest.split('/').next().unwrap_or(rest)
}

/// Opens a line transport to the server at `url`.
///
/// # Errors
///
/// [`BotError::Io`] if the connection cannot be made.
pub fn connect_tcp(url: &str) -> BotResult<(LineReader<TcpStream>, LineWriter<TcpStream>)> {
    let address = socket_address(url);
    debug!(address, "connecting");
    let stream = TcpStream::connect(address)?;
    stream.set_nodelay(true)?;
    let write_half = stream.try_clone()?;
    Ok((LineReader::new(stream), LineWriter::new(write_half)))
}

// =============================================================================
// CHANNEL TRANSPORT
// =============================================================================

/// Bot side of an in-process transport: inbound half.
#[derive(Debug)]
pub struct ChannelReader {
    frames: Receiver<String>,
}

impl FrameReader for ChannelReader {
    fn read_frame(&mut self) -> BotResult<Option<String>> {
        Ok(self.frames.recv().ok())
    }
}

/// Bot side of an in-process transport: outbound half.
#[derive(Debug)]
pub struct ChannelWriter {
    frames: Sender<String>,
}

impl FrameWriter for ChannelWriter {
    fn write_frame(&mut self, frame: &str) -> BotResult<()> {
        self.frames.send(frame.to_string()).map_err(|_| BotError::NotConnected)
    }
}

/// Server side of an in-process transport.
///
/// Dropping `to_bot` closes the connection from the server's side.
#[derive(Debug)]
pub struct ServerEnd {
    /// Frames for the bot.
    pub to_bot: Sender<String>,
    /// Frames sent by the bot.
    pub from_bot: Receiver<String>,
}

/// Creates an in-process transport, for tests and embedded servers.
#[must_use]
pub fn channel_transport() -> (ChannelReader, ChannelWriter, ServerEnd) {
    let (to_bot, inbound) = unbounded();
    let (outbound, from_bot) = unbounded();
    (
        ChannelReader { frames: inbound },
        ChannelWriter { frames: outbound },
        ServerEnd { to_bot, from_bot },
    )
}

// =============================================================================
// CONNECTION
// =============================================================================

/// One bot's connection to a server.
#[derive(Debug)]
pub struct Connection<R, W> {
    url: String,
    reader: R,
    writer: W,
}

impl<R: FrameReader, W: FrameWriter + 'static> Connection<R, W> {
    /// Creates a connection over an open transport.
    #[must_use]
    pub fn new(url: impl Into<String>, reader: R, writer: W) -> Self {
        Self {
            url: url.into(),
            reader,
            writer,
        }
    }

    /// Plays until the server closes the connection, then returns the bot.
    ///
    /// Returns `Ok(None)` if the bot-logic thread panicked along the way.
    ///
    /// # Errors
    ///
    /// [`BotError::Config`] for an invalid configuration, transport errors
    /// from the read loop.
    pub fn run<B: Bot>(self, bot: B, config: BotConfig) -> BotResult<Option<B>> {
        let Self { url, mut reader, mut writer } = self;

        let (outbox, queued) = bounded(config.server.outbox_capacity);
        let mut runtime = BotRuntime::new(bot, config, outbox)?;
        let writer_thread = thread::Builder::new()
            .name("armada-writer".to_string())
            .spawn(move || write_loop(&mut writer, &queued))?;

        runtime.on_connected(&url);
        let outcome = read_loop(&mut reader, &mut runtime);
        match &outcome {
            Ok(()) => runtime.on_disconnected(true),
            Err(e) => {
                runtime.on_connection_error(e);
                runtime.on_disconnected(false);
            }
        }

        // Dropping the runtime drops the last outbox sender; the writer
        // drains what is queued and exits.
        let bot = runtime.shutdown();
        if writer_thread.join().is_err() {
            error!("writer thread panicked");
        }
        info!(url = %url, "connection closed");
        outcome.map(|()| bot)
    }
}

/// Network path: decode and handle frames until the peer closes.
fn read_loop<B: Bot>(reader: &mut impl FrameReader, runtime: &mut BotRuntime<B>) -> BotResult<()> {
    while let Some(frame) = reader.read_frame()? {
        let message = match decode_inbound(&frame) {
            Ok(message) => message,
            Err(e) => {
                warn!(error = %e, "dropping undecodable frame");
                continue;
            }
        };
        trace!(kind = message.kind(), "received");
        match runtime.handle_message(message) {
            Ok(()) => {}
            Err(BotError::NotConnected) => return Err(BotError::NotConnected),
            Err(e) => warn!(error = %e, "message handling failed"),
        }
    }
    Ok(())
}

/// Writer thread: encode and write until every sender is gone.
fn write_loop(writer: &mut impl FrameWriter, queued: &Receiver<OutboundMessage>) {
    for message in queued {
        let frame = match encode_outbound(&message) {
            Ok(frame) => frame,
            Err(e) => {
                error!(kind = message.kind(), error = %e, "dropping unencodable message");
                continue;
            }
        };
        if let Err(e) = writer.write_frame(&frame) {
            warn!(error = %e, "write failed, writer exiting");
            return;
        }
        trace!(kind = message.kind(), "sent");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_socket_address() {
        assert_eq!(socket_address("ws://localhost:7654"), "localhost:7654");
        assert_eq!(socket_address("tcp://10.0.0.1:9/game"), "10.0.0.1:9");
        assert_eq!(socket_address("localhost:7654"), "localhost:7654");
    }

    #[test]
    fn test_line_reader_splits_frames() {
        let mut reader = LineReader::new(Cursor::new("{\"a\":1}\r\n\n{\"b\":2}\n{\"c\":3}"));
        assert_eq!(reader.read_frame().unwrap().as_deref(), Some("{\"a\":1}"));
        assert_eq!(reader.read_frame().unwrap().as_deref(), Some("{\"b\":2}"));
        assert_eq!(reader.read_frame().unwrap().as_deref(), Some("{\"c\":3}"));
        assert_eq!(reader.read_frame().unwrap(), None);
    }

    #[test]
    fn test_line_writer_terminates_frames() {
        let mut writer = LineWriter::new(Vec::new());
        writer.write_frame("one").unwrap();
        writer.write_frame("two").unwrap();
        assert_eq!(writer.inner, b"one\ntwo\n");
    }

    #[test]
    fn test_channel_writer_fails_when_server_gone() {
        let (_reader, mut writer, server) = channel_transport();
        drop(server);
        assert!(matches!(writer.write_frame("x"), Err(BotError::NotConnected)));
    }

    #[test]
    fn test_write_loop_drains_queue() {
        let (tx, rx) = bounded(4);
        tx.send(OutboundMessage::BotReady).unwrap();
        tx.send(OutboundMessage::BotReady).unwrap();
        drop(tx);

        let mut writer = LineWriter::new(Vec::new());
        write_loop(&mut writer, &rx);
        let text = String::from_utf8(writer.inner).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.lines().all(|line| line.contains("BotReady")));
    }
}

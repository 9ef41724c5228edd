use super::packet::{EnginePacket, Handshake, SocketPacket, SocketPacketKind};
use crate::error::PacketError;
use crate::model::LogMessage;
use std::time::Duration;

pub const LOG_EVENT: &str = "log";

/// What to do after one frame was handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Nothing to deliver
    Idle,
    /// Frame to write back on the socket
    Reply(String),
    Log(LogMessage),
    /// The Engine.IO transport was closed
    Closed,
    /// The server removed the client from the namespace
    Disconnected,
    /// The server refused the namespace
    Rejected(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Handshake,
    Joining,
    Joined,
}

/// Client side of one Socket.IO connection joined to a single namespace
#[derive(Debug, Clone)]
pub struct Session {
    namespace: String,
    phase: Phase,
    handshake: Option<Handshake>,
}

impl Session {
    pub fn new(namespace: &str) -> Self {
        Session {
            namespace: namespace.to_string(),
            phase: Phase::Handshake,
            handshake: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Silence allowed before the connection counts as dead. Uses the
    /// server's ping settings once the handshake arrived.
    pub fn liveness_timeout(&self) -> Duration {
        self.handshake.clone().unwrap_or_default().liveness_timeout()
    }

    pub fn on_frame(&mut self, frame: &str) -> Result<Step, PacketError> {
        match EnginePacket::decode(frame)? {
            EnginePacket::Open(payload) => {
                let handshake = Handshake::decode(&payload)?;
                log::debug!(
                    "Push handshake {}: ping every {} ms, timeout {} ms",
                    handshake.sid,
                    handshake.ping_interval,
                    handshake.ping_timeout
                );
                self.handshake = Some(handshake);
                self.phase = Phase::Joining;
                let connect = SocketPacket::connect(&self.namespace).encode();
                Ok(Step::Reply(EnginePacket::Message(connect).encode()))
            }
            EnginePacket::Ping(payload) => Ok(Step::Reply(EnginePacket::Pong(payload).encode())),
            EnginePacket::Close => Ok(Step::Closed),
            EnginePacket::Message(payload) => self.on_socket_packet(&payload),
            EnginePacket::Pong(_) | EnginePacket::Upgrade | EnginePacket::Noop => Ok(Step::Idle),
        }
    }

    fn on_socket_packet(&mut self, payload: &str) -> Result<Step, PacketError> {
        let packet = SocketPacket::decode(payload)?;
        if packet.namespace != self.namespace {
            return Ok(Step::Idle);
        }
        match packet.kind {
            SocketPacketKind::Connect => {
                self.phase = Phase::Joined;
                log::debug!("Joined push namespace {}", self.namespace);
                Ok(Step::Idle)
            }
            SocketPacketKind::Disconnect => Ok(Step::Disconnected),
            SocketPacketKind::ConnectError => {
                let reason = packet
                    .data
                    .as_ref()
                    .and_then(|d| d.get("message"))
                    .and_then(|m| m.as_str())
                    .unwrap_or("unknown reason")
                    .to_string();
                Ok(Step::Rejected(reason))
            }
            SocketPacketKind::Event => {
                let (name, arg) = packet.event()?;
                if name != LOG_EVENT {
                    return Ok(Step::Idle);
                }
                let arg = arg.cloned().ok_or(PacketError::MissingEventName)?;
                Ok(Step::Log(serde_json::from_value(arg)?))
            }
            SocketPacketKind::Ack
            | SocketPacketKind::BinaryEvent
            | SocketPacketKind::BinaryAck => Ok(Step::Idle),
        }
    }
}

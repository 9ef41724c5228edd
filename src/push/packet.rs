//! Engine.IO v4 and Socket.IO v4 text packets
//!
//! A WebSocket text frame carries one Engine.IO packet: a single digit type
//! followed by its payload. Engine.IO `message` packets carry a Socket.IO
//! packet: `<type>[<attachments>-][<namespace>,][<ack id>][<json>]`.

use crate::error::PacketError;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnginePacket {
    Open(String),
    Close,
    Ping(String),
    Pong(String),
    Message(String),
    Upgrade,
    Noop,
}

impl EnginePacket {
    pub fn decode(frame: &str) -> Result<Self, PacketError> {
        let mut chars = frame.chars();
        let kind = chars.next().ok_or(PacketError::Empty)?;
        let payload = chars.as_str().to_string();
        let packet = match kind {
            '0' => EnginePacket::Open(payload),
            '1' => EnginePacket::Close,
            '2' => EnginePacket::Ping(payload),
            '3' => EnginePacket::Pong(payload),
            '4' => EnginePacket::Message(payload),
            '5' => EnginePacket::Upgrade,
            '6' => EnginePacket::Noop,
            other => return Err(PacketError::UnknownEngineType(other)),
        };
        Ok(packet)
    }

    pub fn encode(&self) -> String {
        match self {
            EnginePacket::Open(payload) => format!("0{payload}"),
            EnginePacket::Close => "1".to_string(),
            EnginePacket::Ping(payload) => format!("2{payload}"),
            EnginePacket::Pong(payload) => format!("3{payload}"),
            EnginePacket::Message(payload) => format!("4{payload}"),
            EnginePacket::Upgrade => "5".to_string(),
            EnginePacket::Noop => "6".to_string(),
        }
    }
}

/// Payload of the Engine.IO `open` packet
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Handshake {
    #[serde(default)]
    pub sid: String,
    #[serde(default = "Handshake::default_ping_interval")]
    pub ping_interval: u64,
    #[serde(default = "Handshake::default_ping_timeout")]
    pub ping_timeout: u64,
}

impl Handshake {
    fn default_ping_interval() -> u64 {
        25_000
    }

    fn default_ping_timeout() -> u64 {
        20_000
    }

    pub fn decode(payload: &str) -> Result<Self, PacketError> {
        Ok(serde_json::from_str(payload)?)
    }

    /// Longest silence after which the server is considered gone
    pub fn liveness_timeout(&self) -> Duration {
        Duration::from_millis(self.ping_interval.saturating_add(self.ping_timeout))
    }
}

impl Default for Handshake {
    fn default() -> Self {
        Handshake {
            sid: String::new(),
            ping_interval: Self::default_ping_interval(),
            ping_timeout: Self::default_ping_timeout(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketPacketKind {
    Connect,
    Disconnect,
    Event,
    Ack,
    ConnectError,
    BinaryEvent,
    BinaryAck,
}

impl SocketPacketKind {
    fn from_char(c: char) -> Result<Self, PacketError> {
        Ok(match c {
            '0' => SocketPacketKind::Connect,
            '1' => SocketPacketKind::Disconnect,
            '2' => SocketPacketKind::Event,
            '3' => SocketPacketKind::Ack,
            '4' => SocketPacketKind::ConnectError,
            '5' => SocketPacketKind::BinaryEvent,
            '6' => SocketPacketKind::BinaryAck,
            other => return Err(PacketError::UnknownSocketType(other)),
        })
    }

    fn as_char(self) -> char {
        match self {
            SocketPacketKind::Connect => '0',
            SocketPacketKind::Disconnect => '1',
            SocketPacketKind::Event => '2',
            SocketPacketKind::Ack => '3',
            SocketPacketKind::ConnectError => '4',
            SocketPacketKind::BinaryEvent => '5',
            SocketPacketKind::BinaryAck => '6',
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SocketPacket {
    pub kind: SocketPacketKind,
    pub namespace: String,
    pub ack_id: Option<u64>,
    pub data: Option<serde_json::Value>,
}

impl SocketPacket {
    pub fn connect(namespace: &str) -> Self {
        SocketPacket {
            kind: SocketPacketKind::Connect,
            namespace: namespace.to_string(),
            ack_id: None,
            data: None,
        }
    }

    pub fn decode(payload: &str) -> Result<Self, PacketError> {
        let mut chars = payload.chars();
        let kind = SocketPacketKind::from_char(chars.next().ok_or(PacketError::Empty)?)?;
        let mut rest = chars.as_str();

        // binary attachments count, e.g. `51-`
        if matches!(kind, SocketPacketKind::BinaryEvent | SocketPacketKind::BinaryAck) {
            if let Some(dash) = rest.find('-') {
                rest = &rest[dash + 1..];
            }
        }

        let mut namespace = "/".to_string();
        if rest.starts_with('/') {
            let end = rest.find(',').unwrap_or(rest.len());
            namespace = rest[..end].to_string();
            rest = rest.get(end + 1..).unwrap_or("");
        }

        let digits = rest.chars().take_while(char::is_ascii_digit).count();
        let ack_id = if digits > 0 {
            rest[..digits].parse().ok()
        } else {
            None
        };
        rest = &rest[digits..];

        let data = if rest.is_empty() {
            None
        } else {
            Some(serde_json::from_str(rest)?)
        };

        Ok(SocketPacket {
            kind,
            namespace,
            ack_id,
            data,
        })
    }

    pub fn encode(&self) -> String {
        let mut out = String::new();
        out.push(self.kind.as_char());
        if self.namespace != "/" {
            out.push_str(&self.namespace);
            out.push(',');
        }
        if let Some(id) = self.ack_id {
            out.push_str(&id.to_string());
        }
        if let Some(data) = &self.data {
            out.push_str(&data.to_string());
        }
        out
    }

    /// Name and first argument of an EVENT packet
    pub fn event(&self) -> Result<(&str, Option<&serde_json::Value>), PacketError> {
        let args = self
            .data
            .as_ref()
            .and_then(|d| d.as_array())
            .ok_or(PacketError::MissingEventName)?;
        let name = args
            .first()
            .and_then(|n| n.as_str())
            .ok_or(PacketError::MissingEventName)?;
        Ok((name, args.get(1)))
    }
}

use serde::{Deserialize, Serialize};

/// The event kinds the synchronizer subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    PlayerJoined,
    PlayerLeft,
    PlayerKicked,
    ChatMessage,
    /// Terminal signal: the host is shutting the component down.
    End,
}

impl EventKind {
    /// Wire name of the event as delivered by the host bus.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PlayerJoined => "clan:player_joined",
            Self::PlayerLeft => "clan:player_left",
            Self::PlayerKicked => "clan:player_kicked",
            Self::ChatMessage => "chat:message",
            Self::End => "end",
        }
    }

    /// Parse from a wire name.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "clan:player_joined" => Some(Self::PlayerJoined),
            "clan:player_left" => Some(Self::PlayerLeft),
            "clan:player_kicked" => Some(Self::PlayerKicked),
            "chat:message" => Some(Self::ChatMessage),
            "end" => Some(Self::End),
            _ => None,
        }
    }
}

/// An event delivered over the bus.
///
/// Payloads mirror the wire format: membership events may arrive without a
/// username. Such events are malformed input and the router ignores them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ClanEvent {
    PlayerJoined { username: Option<String> },
    PlayerLeft { username: Option<String> },
    PlayerKicked { username: Option<String> },
    ChatMessage { kind: String, username: Option<String> },
    End,
}

impl ClanEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::PlayerJoined { .. } => EventKind::PlayerJoined,
            Self::PlayerLeft { .. } => EventKind::PlayerLeft,
            Self::PlayerKicked { .. } => EventKind::PlayerKicked,
            Self::ChatMessage { .. } => EventKind::ChatMessage,
            Self::End => EventKind::End,
        }
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            Self::PlayerJoined { username }
            | Self::PlayerLeft { username }
            | Self::PlayerKicked { username }
            | Self::ChatMessage { username, .. } => username.as_deref(),
            Self::End => None,
        }
    }

    /// A join event carrying a username.
    pub fn joined(username: &str) -> Self {
        Self::PlayerJoined {
            username: Some(username.to_owned()),
        }
    }

    /// A leave event carrying a username.
    pub fn left(username: &str) -> Self {
        Self::PlayerLeft {
            username: Some(username.to_owned()),
        }
    }

    /// A kick event carrying a username.
    pub fn kicked(username: &str) -> Self {
        Self::PlayerKicked {
            username: Some(username.to_owned()),
        }
    }

    /// A chat message of the given kind.
    pub fn chat(kind: &str, username: Option<&str>) -> Self {
        Self::ChatMessage {
            kind: kind.to_owned(),
            username: username.map(str::to_owned),
        }
    }
}

use chrono::{DateTime, Utc};

/// Outcome events emitted by the role synchronizer.
///
/// Events are always produced; whether anything observes them depends on the
/// listeners the synchronizer was built with. Failures appear here and
/// nowhere else; no error crosses the event-bus boundary.
#[derive(Debug, Clone)]
pub enum SyncEvent {
    // bootstrap
    BootstrapCompleted {
        at: DateTime<Utc>,
    },
    BootstrapFailed {
        reason: String,
        at: DateTime<Utc>,
    },

    // reconciliation
    MemberGranted {
        username: String,
        at: DateTime<Utc>,
    },
    MemberRevoked {
        username: String,
        at: DateTime<Utc>,
    },
    /// The user holds the admin group, which supersedes member.
    GrantSkipped {
        username: String,
        at: DateTime<Utc>,
    },
    GrantFailed {
        username: String,
        reason: String,
        at: DateTime<Utc>,
    },
    RevokeFailed {
        username: String,
        reason: String,
        at: DateTime<Utc>,
    },

    // lifecycle
    Started {
        at: DateTime<Utc>,
    },
    Reloaded {
        at: DateTime<Utc>,
    },
    Stopped {
        at: DateTime<Utc>,
    },
}

impl SyncEvent {
    /// Returns a dot-separated event name for logging/tracing.
    pub fn name(&self) -> &'static str {
        match self {
            Self::BootstrapCompleted { .. } => "bootstrap.completed",
            Self::BootstrapFailed { .. } => "bootstrap.failed",
            Self::MemberGranted { .. } => "role.granted",
            Self::MemberRevoked { .. } => "role.revoked",
            Self::GrantSkipped { .. } => "role.grant.skipped",
            Self::GrantFailed { .. } => "role.grant.failed",
            Self::RevokeFailed { .. } => "role.revoke.failed",
            Self::Started { .. } => "lifecycle.started",
            Self::Reloaded { .. } => "lifecycle.reloaded",
            Self::Stopped { .. } => "lifecycle.stopped",
        }
    }

    /// Returns the timestamp when this event occurred.
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::BootstrapCompleted { at }
            | Self::BootstrapFailed { at, .. }
            | Self::MemberGranted { at, .. }
            | Self::MemberRevoked { at, .. }
            | Self::GrantSkipped { at, .. }
            | Self::GrantFailed { at, .. }
            | Self::RevokeFailed { at, .. }
            | Self::Started { at }
            | Self::Reloaded { at }
            | Self::Stopped { at } => *at,
        }
    }
}

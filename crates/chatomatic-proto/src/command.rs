//! Typed protocol commands.
//!
//! Each request verb gets its own variant so the verb can never drift from
//! its argument list. The verb is derived from the variant, never stored,
//! and `encode()` is exhaustive: adding a variant without wiring it up is
//! a compile error.

use chrono::NaiveTime;

/// Field delimiter of the wire format.
///
/// Arguments must not contain the delimiter or a line break; that is a
/// caller precondition, not a recoverable condition (the wire format has
/// no escaping).
pub const DELIMITER: &str = "/%";

/// A protocol request: verb plus ordered string arguments.
///
/// Serialized as the verb followed by `/%arg` per argument; the transport
/// appends the terminating newline. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Authenticate as `username`.
    Login {
        /// Account name.
        username: String,
        /// Account password.
        password: String,
    },

    /// End the authenticated session.
    Logout,

    /// Query our own display name.
    GetMe,

    /// Query the currently connected users.
    GetActive,

    /// Query all registered users.
    GetUsers,

    /// Verify the current account password.
    CheckPassword {
        /// Password to verify.
        password: String,
    },

    /// Change the account display name.
    EditName {
        /// New display name.
        name: String,
    },

    /// Change the account password.
    EditPassword {
        /// Current password.
        old: String,
        /// Replacement password.
        new: String,
    },

    /// Send a chat message.
    Send {
        /// Recipient user name.
        recipient: String,
        /// Message body.
        body: String,
    },

    /// Fetch messages newer than the cursor.
    ///
    /// `None` asks for all available history (first fetch of a session).
    GetMessages {
        /// Timestamp of the last consumed message, if any.
        since: Option<NaiveTime>,
    },

    /// Protocol-level liveness probe.
    Probe,

    /// Sentinel sent when tearing the connection down.
    End,
}

impl Command {
    /// Wire verb for this command.
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Login { .. } => "login",
            Self::Logout => "logout",
            Self::GetMe => "getme",
            Self::GetActive => "getactive",
            Self::GetUsers => "getusers",
            Self::CheckPassword { .. } => "password",
            Self::EditName { .. } => "editname",
            Self::EditPassword { .. } => "editpw",
            Self::Send { .. } => "message",
            Self::GetMessages { .. } => "getmsg",
            Self::Probe => "probe",
            Self::End => "end",
        }
    }

    /// Encode into one wire line (without the terminating newline).
    ///
    /// Precondition: no argument contains [`DELIMITER`] or a line break.
    /// Violations are programming errors and only checked in debug builds.
    pub fn encode(&self) -> String {
        let mut line = String::from(self.verb());
        for arg in self.args() {
            debug_assert!(
                !arg.contains(DELIMITER) && !arg.contains('\n') && !arg.contains('\r'),
                "command argument contains delimiter or line break: {arg:?}"
            );
            line.push_str(DELIMITER);
            line.push_str(&arg);
        }
        line
    }

    /// Ordered wire arguments for this command.
    fn args(&self) -> Vec<String> {
        match self {
            Self::Login { username, password } => vec![username.clone(), password.clone()],
            Self::CheckPassword { password } => vec![password.clone()],
            Self::EditName { name } => vec![name.clone()],
            Self::EditPassword { old, new } => vec![old.clone(), new.clone()],
            Self::Send { recipient, body } => vec![recipient.clone(), body.clone()],
            // An empty cursor field means "from the beginning".
            Self::GetMessages { since } => {
                vec![since.map(|t| t.to_string()).unwrap_or_default()]
            },
            Self::Logout | Self::GetMe | Self::GetActive | Self::GetUsers | Self::Probe
            | Self::End => Vec::new(),
        }
    }
}

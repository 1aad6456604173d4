//! Public operation facade.

use chatomatic_proto::{Command, Message, NaiveTime, Response};
use tracing::debug;

use crate::channel::RequestChannel;

/// The public surface external collaborators use.
///
/// Every operation is one [`RequestChannel::execute`] round trip with a
/// fixed verb. A response is successful iff its status is `ok`; any other
/// status (and transport absence) yields the operation's failure value.
/// No operation returns an error or panics: failures are ordinary values
/// so UI collaborators can render them directly.
///
/// All operations uniformly require a `Connected` channel; issuing one
/// while disconnected is a no-op returning the failure value.
#[derive(Clone)]
pub struct ChatClient {
    channel: RequestChannel,
}

impl ChatClient {
    /// Build the facade over a request channel.
    pub fn new(channel: RequestChannel) -> Self {
        Self { channel }
    }

    /// The underlying request channel (shared with the session loops).
    pub fn channel(&self) -> &RequestChannel {
        &self.channel
    }

    /// Authenticate. `true` on success.
    pub async fn login(&self, username: impl Into<String>, password: impl Into<String>) -> bool {
        self.execute_ack(Command::Login { username: username.into(), password: password.into() })
            .await
    }

    /// End the authenticated session. `true` on success.
    pub async fn logout(&self) -> bool {
        self.execute_ack(Command::Logout).await
    }

    /// Our own display name, or `None` on failure.
    pub async fn display_name(&self) -> Option<String> {
        let response = self.execute_ok(Command::GetMe).await?;
        response.into_fields().into_iter().next()
    }

    /// Currently connected users, or `None` on failure.
    pub async fn active_users(&self) -> Option<Vec<String>> {
        Some(self.execute_ok(Command::GetActive).await?.into_fields())
    }

    /// All registered users, or `None` on failure.
    pub async fn all_users(&self) -> Option<Vec<String>> {
        Some(self.execute_ok(Command::GetUsers).await?.into_fields())
    }

    /// Verify the current account password. `true` when it matches.
    pub async fn check_password(&self, password: impl Into<String>) -> bool {
        self.execute_ack(Command::CheckPassword { password: password.into() }).await
    }

    /// Change the account display name. `true` on success.
    pub async fn change_display_name(&self, name: impl Into<String>) -> bool {
        self.execute_ack(Command::EditName { name: name.into() }).await
    }

    /// Change the account password. `true` on success.
    pub async fn change_password(
        &self,
        old: impl Into<String>,
        new: impl Into<String>,
    ) -> bool {
        self.execute_ack(Command::EditPassword { old: old.into(), new: new.into() }).await
    }

    /// Send a message. `true` when the server accepted it.
    pub async fn send_message(
        &self,
        recipient: impl Into<String>,
        body: impl Into<String>,
    ) -> bool {
        self.execute_ack(Command::Send { recipient: recipient.into(), body: body.into() }).await
    }

    /// Fetch messages newer than `since` (`None` fetches all history).
    ///
    /// `Some(vec![])` means the exchange succeeded and there is nothing
    /// new; `None` means the exchange itself failed, which the fetch loop
    /// reports as a connection failure. A batch that fails to parse
    /// is discarded whole, never partially applied.
    pub async fn messages_since(&self, since: Option<NaiveTime>) -> Option<Vec<Message>> {
        let response = self.execute_ok(Command::GetMessages { since }).await?;
        match response.parse_messages() {
            Ok(batch) => Some(batch),
            Err(error) => {
                debug!(%error, "discarding malformed message batch");
                None
            },
        }
    }

    /// Execute and reduce to "did the server ack with `ok`".
    async fn execute_ack(&self, command: Command) -> bool {
        self.channel.execute(&command).await.is_some_and(|response| response.is_ok())
    }

    /// Execute and keep the response only when its status is `ok`.
    async fn execute_ok(&self, command: Command) -> Option<Response> {
        self.channel.execute(&command).await.filter(Response::is_ok)
    }
}

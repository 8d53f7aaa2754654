//! Models relating to channels and the messages sent in them.

use serde::{Deserialize, Serialize};

use super::id::MessageId;
use super::user::User;

/// A message sent in a text channel, as found in the resolved data of a message context-menu
/// command.
///
/// [Discord docs](https://discord.com/developers/docs/resources/channel#message-object).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[non_exhaustive]
pub struct Message {
    /// The unique Id of the message.
    pub id: MessageId,
    /// The user that sent the message.
    pub author: User,
    /// The content of the message.
    #[serde(default)]
    pub content: String,
}

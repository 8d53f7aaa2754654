use std::collections::HashMap;

use serde::de::Error as DeError;
use serde::{Deserialize, Serialize};

use super::{CommandOptionType, CommandType};
use crate::internal::prelude::*;
use crate::model::channel::Message;
use crate::model::id::{CommandId, GuildId, InteractionId, MessageId, TargetId, UserId};
use crate::model::user::{Member, User};

/// An interaction when a user invokes a slash or context-menu command.
///
/// [Discord docs](https://discord.com/developers/docs/interactions/receiving-and-responding#interaction-object).
#[derive(Clone, Debug, Deserialize)]
#[non_exhaustive]
pub struct CommandInteraction {
    /// Id of the interaction.
    #[serde(default)]
    pub id: Option<InteractionId>,
    /// The data of the interaction which was triggered.
    pub data: CommandData,
    /// The guild Id this interaction was sent from, if there is one.
    #[serde(default)]
    pub guild_id: Option<GuildId>,
    /// The `member` data for the invoking user.
    ///
    /// **Note**: It is only present if the interaction is triggered in a guild.
    #[serde(default)]
    pub member: Option<Member>,
    /// The `user` object for the invoking user.
    ///
    /// **Note**: It is only present if the interaction is triggered in a DM.
    #[serde(default)]
    pub user: Option<User>,
}

impl CommandInteraction {
    /// The user who invoked the command.
    ///
    /// Guild interactions carry the user inside `member`, DM interactions carry it in `user`.
    #[must_use]
    pub fn invoking_user_id(&self) -> Option<&UserId> {
        self.member
            .as_ref()
            .and_then(|member| member.user.as_ref())
            .or(self.user.as_ref())
            .map(|user| &user.id)
    }
}

/// The command data payload.
///
/// [Discord docs](https://discord.com/developers/docs/interactions/receiving-and-responding#interaction-object-interaction-data-structure).
#[derive(Clone, Debug, Deserialize)]
#[serde(try_from = "RawCommandData")]
#[non_exhaustive]
pub struct CommandData {
    /// The Id of the invoked command.
    pub id: Option<CommandId>,
    /// The name of the invoked command.
    pub name: String,
    /// How the command was invoked, with the data that comes with that kind of invocation.
    pub invocation: CommandInvocation,
}

impl CommandData {
    /// The application command type of the triggered application command.
    #[must_use]
    pub fn kind(&self) -> CommandType {
        match &self.invocation {
            CommandInvocation::ChatInput(_) => CommandType::ChatInput,
            CommandInvocation::User(_) => CommandType::User,
            CommandInvocation::Message(_) => CommandType::Message,
            CommandInvocation::Unknown(kind) => CommandType::Unknown(*kind),
        }
    }
}

/// The three ways a command can be invoked.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub enum CommandInvocation {
    /// A slash command, with the options the user filled in.
    ChatInput(Vec<CommandDataOption>),
    /// A user context-menu command, targeting the user that was right clicked.
    User(TargetId),
    /// A message context-menu command, with the resolved message that was right clicked.
    Message(ResolvedMessages),
    /// A command type this crate doesn't know about.
    Unknown(u8),
}

/// The messages resolved for a message context-menu command.
///
/// Discord only ever sends the targeted message here.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ResolvedMessages(pub HashMap<MessageId, Message>);

impl ResolvedMessages {
    /// The targeted message.
    ///
    /// If more than one message was resolved, one of them is returned and which one is
    /// unspecified.
    #[must_use]
    pub fn target(&self) -> Option<&Message> {
        self.0.values().next()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Deserialize)]
struct RawCommandData {
    #[serde(default)]
    id: Option<CommandId>,
    name: String,
    #[serde(rename = "type")]
    kind: CommandType,
    #[serde(default)]
    options: Vec<CommandDataOption>,
    #[serde(default)]
    target_id: Option<TargetId>,
    #[serde(default)]
    resolved: RawResolved,
}

#[derive(Default, Deserialize)]
struct RawResolved {
    #[serde(default)]
    messages: ResolvedMessages,
}

impl TryFrom<RawCommandData> for CommandData {
    type Error = Error;

    fn try_from(raw: RawCommandData) -> Result<Self> {
        let invocation = match raw.kind {
            CommandType::ChatInput => CommandInvocation::ChatInput(raw.options),
            CommandType::User => {
                let target = raw.target_id.ok_or_else(|| {
                    Error::Json(DeError::missing_field("target_id"))
                })?;
                CommandInvocation::User(target)
            },
            CommandType::Message => CommandInvocation::Message(raw.resolved.messages),
            CommandType::Unknown(kind) => CommandInvocation::Unknown(kind),
        };

        Ok(Self {
            id: raw.id,
            name: raw.name,
            invocation,
        })
    }
}

/// A parameter and the value the user gave it.
///
/// Only the shape the thanks command needs is modelled: the value is kept as raw JSON and
/// interpreted by the accessors.
///
/// [Discord docs](https://discord.com/developers/docs/interactions/application-commands#application-command-object-application-command-interaction-data-option-structure).
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[non_exhaustive]
pub struct CommandDataOption {
    /// The name of the parameter.
    #[serde(default)]
    pub name: String,
    /// The type of the parameter.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<CommandOptionType>,
    /// The given value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl CommandDataOption {
    /// If the value names a user, returns it. User options carry the id as a string.
    #[must_use]
    pub fn as_user_id(&self) -> Option<UserId> {
        match self.value.as_ref()? {
            Value::String(id) if !id.is_empty() => Some(UserId::new(id.as_str())),
            Value::Number(id) => id.as_u64().map(UserId::from),
            _ => None,
        }
    }
}

//! A collection of newtypes defining type-strong IDs.

use std::fmt;

use serde::de::{Error as DeError, Visitor};

/// Visitor accepting a snowflake either as a JSON string or as an integer.
pub(crate) struct SnowflakeVisitor;

impl<'de> Visitor<'de> for SnowflakeVisitor {
    type Value = Box<str>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a non-empty string or integer snowflake")
    }

    fn visit_u64<E: DeError>(self, value: u64) -> Result<Self::Value, E> {
        Ok(value.to_string().into_boxed_str())
    }

    fn visit_i64<E: DeError>(self, value: i64) -> Result<Self::Value, E> {
        u64::try_from(value)
            .map_err(|_| E::custom(format!("snowflake cannot be negative: {value}")))
            .and_then(|value| self.visit_u64(value))
    }

    fn visit_str<E: DeError>(self, value: &str) -> Result<Self::Value, E> {
        if value.is_empty() {
            return Err(E::invalid_value(serde::de::Unexpected::Str(value), &self));
        }

        Ok(value.into())
    }
}

id_string! {
    /// An identifier for a slash command.
    CommandId;
    /// An identifier for a Guild
    GuildId;
    /// An identifier for an interaction.
    InteractionId;
    /// An identifier for a Message
    MessageId;
    /// An identifier for a User
    UserId;
    /// The target of a context-menu command: a [`UserId`] for user commands, a [`MessageId`] for
    /// message commands.
    TargetId;
}

impl TargetId {
    /// Converts this [`TargetId`] to [`UserId`].
    #[must_use]
    pub fn to_user_id(&self) -> UserId {
        UserId(self.0.clone())
    }

    /// Converts this [`TargetId`] to [`MessageId`].
    #[must_use]
    pub fn to_message_id(&self) -> MessageId {
        MessageId(self.0.clone())
    }
}

impl From<TargetId> for UserId {
    fn from(id: TargetId) -> Self {
        Self(id.0)
    }
}

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};

use super::{CommandInteraction, PingInteraction};
use crate::internal::prelude::*;
use crate::json::from_value;

/// [Discord docs](https://discord.com/developers/docs/interactions/receiving-and-responding#interaction-object)
#[derive(Clone, Debug)]
#[non_exhaustive]
pub enum Interaction {
    Ping(PingInteraction),
    Command(CommandInteraction),
    /// Interactions the bot does not handle, such as components or modals. Only the type is kept.
    Other(InteractionType),
}

impl Interaction {
    /// Gets the interaction type
    #[must_use]
    pub fn kind(&self) -> InteractionType {
        match self {
            Self::Ping(_) => InteractionType::Ping,
            Self::Command(_) => InteractionType::Command,
            Self::Other(kind) => *kind,
        }
    }
}

// Manual impl needed to emulate integer enum tags
impl<'de> Deserialize<'de> for Interaction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> StdResult<Self, D::Error> {
        let map = JsonMap::deserialize(deserializer)?;

        let raw_kind = map.get("type").ok_or_else(|| DeError::missing_field("type"))?.clone();
        let kind = InteractionType::deserialize(raw_kind).map_err(DeError::custom)?;
        let value = Value::from(map);

        match kind {
            InteractionType::Ping => from_value(value).map(Interaction::Ping),
            InteractionType::Command => from_value(value).map(Interaction::Command),
            other => Ok(Interaction::Other(other)),
        }
        .map_err(DeError::custom)
    }
}

enum_number! {
    /// The type of an Interaction.
    ///
    /// [Discord docs](https://discord.com/developers/docs/interactions/receiving-and-responding#interaction-object-interaction-type).
    #[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
    #[serde(from = "u8", into = "u8")]
    #[non_exhaustive]
    pub enum InteractionType {
        Ping = 1,
        Command = 2,
        Component = 3,
        Autocomplete = 4,
        Modal = 5,
        _ => Unknown(u8),
    }
}

bitflags! {
    /// The flags for an interaction response message.
    ///
    /// [Discord docs](https://discord.com/developers/docs/resources/channel#message-object-message-flags)
    /// ([only some are valid in this context](https://discord.com/developers/docs/interactions/receiving-and-responding#interaction-response-object-messages))
    #[derive(Copy, Clone, Default, Debug, Eq, Hash, PartialEq)]
    pub struct InteractionResponseFlags: u64 {
        /// Do not include any embeds when serializing this message.
        const SUPPRESS_EMBEDS = 1 << 2;
        /// Interaction message will only be visible to sender and will
        /// be quickly deleted.
        const EPHEMERAL = 1 << 6;
        /// Does not trigger push notifications or desktop notifications.
        const SUPPRESS_NOTIFICATIONS = 1 << 12;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::{json, to_value};

    #[test]
    fn ping_is_recognised_by_type() {
        let interaction: Interaction = from_value(json!({"type": 1, "id": "1"})).unwrap();
        assert_eq!(interaction.kind(), InteractionType::Ping);
    }

    #[test]
    fn unhandled_types_are_kept_as_other() {
        let interaction: Interaction =
            from_value(json!({"type": 3, "data": {"custom_id": "x"}})).unwrap();
        assert!(matches!(interaction, Interaction::Other(InteractionType::Component)));

        let interaction: Interaction = from_value(json!({"type": 42})).unwrap();
        assert!(matches!(interaction, Interaction::Other(InteractionType::Unknown(42))));
    }

    #[test]
    fn missing_type_is_an_error() {
        assert!(from_value::<Interaction>(json!({"data": {}})).is_err());
        assert!(from_value::<Interaction>(json!({"type": "ping"})).is_err());
    }

    #[test]
    fn response_flags_serialize_as_bits() {
        assert_eq!(to_value(InteractionResponseFlags::EPHEMERAL).unwrap(), json!(64));
    }
}

use serde::{Deserialize, Serialize};

enum_number! {
    /// The type of an application command.
    ///
    /// [Discord docs](https://discord.com/developers/docs/interactions/application-commands#application-command-object-application-command-types).
    #[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
    #[serde(from = "u8", into = "u8")]
    #[non_exhaustive]
    pub enum CommandType {
        /// Slash command, typed into the chat box.
        ChatInput = 1,
        /// Context-menu command shown when right clicking a user.
        User = 2,
        /// Context-menu command shown when right clicking a message.
        Message = 3,
        _ => Unknown(u8),
    }
}

enum_number! {
    /// The type of a command option.
    ///
    /// [Discord docs](https://discord.com/developers/docs/interactions/application-commands#application-command-object-application-command-option-type).
    #[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
    #[serde(from = "u8", into = "u8")]
    #[non_exhaustive]
    pub enum CommandOptionType {
        SubCommand = 1,
        SubCommandGroup = 2,
        String = 3,
        Integer = 4,
        Boolean = 5,
        User = 6,
        Channel = 7,
        Role = 8,
        Mentionable = 9,
        Number = 10,
        Attachment = 11,
        _ => Unknown(u8),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::{from_value, json, to_value};

    #[test]
    fn command_type_round_trips_unknown_values() {
        assert_eq!(from_value::<CommandType>(json!(3)).unwrap(), CommandType::Message);
        assert_eq!(from_value::<CommandType>(json!(9)).unwrap(), CommandType::Unknown(9));
        assert_eq!(to_value(CommandType::Unknown(9)).unwrap(), json!(9));
    }
}

use serde::Serialize;

use crate::model::application::{CommandOptionType, CommandType};

/// A builder for creating a new command option.
///
/// [Discord docs](https://discord.com/developers/docs/interactions/application-commands#application-command-object-application-command-option-structure).
#[derive(Clone, Debug, Serialize)]
#[must_use]
pub struct CreateCommandOption {
    #[serde(rename = "type")]
    kind: CommandOptionType,
    name: String,
    description: String,
    required: bool,
}

impl CreateCommandOption {
    /// Creates a new builder with the given option type, name, and description.
    pub fn new(
        kind: CommandOptionType,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            description: description.into(),
            required: false,
        }
    }

    /// Sets if this option is required or optional.
    ///
    /// **Note**: This defaults to `false`.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}

/// A builder for creating a new application command.
///
/// Context-menu commands ([`CommandType::User`] and [`CommandType::Message`]) must not have a
/// description or options, so both are only serialized when set.
///
/// [Discord docs](https://discord.com/developers/docs/interactions/application-commands#create-global-application-command).
#[derive(Clone, Debug, Serialize)]
#[must_use]
pub struct CreateCommand {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    options: Vec<CreateCommandOption>,
    #[serde(rename = "type")]
    kind: CommandType,
}

impl CreateCommand {
    /// Creates a new slash command builder with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            options: Vec::new(),
            kind: CommandType::ChatInput,
        }
    }

    /// Specifies the type of the application command.
    pub fn kind(mut self, kind: CommandType) -> Self {
        self.kind = kind;
        self
    }

    /// Specifies the description of the application command.
    ///
    /// **Note**: Must be between 1 and 100 characters long.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds an application command option for the application command.
    ///
    /// **Note**: Application commands can have up to 25 options.
    pub fn add_option(mut self, option: CreateCommandOption) -> Self {
        self.options.push(option);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::{assert_json, json};

    #[test]
    fn context_menu_command_has_no_description() {
        assert_json(
            &CreateCommand::new("Thank").kind(CommandType::Message),
            json!({"name": "Thank", "type": 3}),
        );
    }

    #[test]
    fn slash_command_with_user_option() {
        let command = CreateCommand::new("thank").description("Thank a user").add_option(
            CreateCommandOption::new(CommandOptionType::User, "user", "Who to thank")
                .required(true),
        );

        assert_json(
            &command,
            json!({
                "name": "thank",
                "description": "Thank a user",
                "options": [{"type": 6, "name": "user", "description": "Who to thank", "required": true}],
                "type": 1,
            }),
        );
    }
}

//! The application commands the bot answers to.
//!
//! Discord only delivers interactions for registered commands, so these payloads have to be
//! uploaded once, for example with `thanks-bot commands` piped into the bulk overwrite endpoint.

use crate::builder::{CreateCommand, CreateCommandOption};
use crate::model::application::{CommandOptionType, CommandType};

/// Name of the slash command.
pub const THANK: &str = "thank";
/// Name of both context-menu commands. Context-menu names are shown as typed in the menu.
pub const THANK_CONTEXT_MENU: &str = "Thank";
/// Name of the counter lookup command.
pub const MY_THANKS: &str = "my_thanks";

/// Whether the command name is one of the thank commands.
#[must_use]
pub fn is_thank(name: &str) -> bool {
    name == THANK || name == THANK_CONTEXT_MENU
}

/// All commands, in the shape of a bulk overwrite request.
#[must_use]
pub fn application_commands() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new(THANK).description("Thank someone for their help").add_option(
            CreateCommandOption::new(CommandOptionType::User, "user", "The user to thank")
                .required(true),
        ),
        CreateCommand::new(THANK_CONTEXT_MENU).kind(CommandType::User),
        CreateCommand::new(THANK_CONTEXT_MENU).kind(CommandType::Message),
        CreateCommand::new(MY_THANKS).description("See how many thanks you have received"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::{json, to_value};

    #[test]
    fn both_thank_spellings_are_accepted() {
        assert!(is_thank("thank"));
        assert!(is_thank("Thank"));
        assert!(!is_thank("THANK"));
        assert!(!is_thank(MY_THANKS));
    }

    #[test]
    fn registers_four_commands() {
        let value = to_value(application_commands()).unwrap();
        let kinds: Vec<_> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|command| (command["name"].clone(), command["type"].clone()))
            .collect();

        assert_eq!(kinds, vec![
            (json!("thank"), json!(1)),
            (json!("Thank"), json!(2)),
            (json!("Thank"), json!(3)),
            (json!("my_thanks"), json!(1)),
        ]);
    }
}

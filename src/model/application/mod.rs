//! Models about application commands and the interactions invoking them.

mod command;
pub use command::*;
mod command_interaction;
pub use command_interaction::*;
mod interaction;
pub use interaction::*;
mod ping_interaction;
pub use ping_interaction::*;

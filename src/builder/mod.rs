//! A set of builders used to make the payloads sent back to Discord.
//!
//! These are used when not all parameters are required, all parameters are optional, and/or sane
//! default values for required parameters can be applied by a builder.

mod create_command;
mod create_interaction_response;

pub use create_command::*;
pub use create_interaction_response::*;

//! Mappings of objects received from the API.
//!
//! Only the parts of Discord's interaction payloads that the thanks commands read are modelled.
//! Unknown fields are ignored, so payloads carrying more data still deserialize.

pub mod application;
pub mod channel;
pub mod id;
pub mod mention;
pub mod user;

pub mod prelude {
    //! The model prelude re-exports all types in the model sub-modules.
    //!
    //! This allows for quick and easy access to all of the model types.
    //!
    //! # Examples
    //!
    //! Import all model types into scope:
    //!
    //! ```rust,no_run
    //! use thanks_bot::model::prelude::*;
    //! ```
    #[doc(inline)]
    pub use super::{application::*, channel::*, id::*, mention::*, user::*};
}

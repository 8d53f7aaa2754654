use serde::{Deserialize, Serialize};

/// A ping interaction, which can only be received through an endpoint url.
///
/// Discord sends one when the endpoint url is saved and rejects the url unless it is answered
/// with a pong. Only the interaction type matters, so none of the payload's fields are kept.
///
/// [Discord docs](https://discord.com/developers/docs/interactions/receiving-and-responding#interaction-object-interaction-structure).
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[non_exhaustive]
pub struct PingInteraction {}

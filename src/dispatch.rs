//! Turns a signed interaction request into the response Discord expects.
//!
//! [`InteractionDispatcher::handle`] is independent of the HTTP server, the transport only has to
//! hand over the two signature headers and the raw body.

use tracing::{debug, error, info, warn};

use crate::builder::{CreateInteractionResponse, CreateInteractionResponseMessage};
use crate::commands;
use crate::interactions_endpoint::Verifier;
use crate::json;
use crate::model::application::{CommandData, CommandInteraction, CommandInvocation, Interaction};
use crate::model::id::UserId;
use crate::model::mention::Mentionable;
use crate::thanks::ThanksLedger;

/// Sent whenever a command can't be handled.
pub const GENERIC_ERROR: &str = "Something went wrong. Please try again.";
/// Sent when a user tries to thank themselves.
pub const SELF_THANK: &str = "You can't thank yourself!";
/// Sent by `my_thanks` to users that were never thanked.
pub const NO_THANKS_YET: &str = "You don't have any thanks yet!";
/// Body of the 401 answer to requests failing verification.
pub const INVALID_SIGNATURE: &str = "Invalid signature";

/// The parts of an HTTP request the dispatcher looks at.
#[derive(Clone, Copy, Debug)]
pub struct EndpointRequest<'a> {
    /// Value of the `X-Signature-Ed25519` header.
    pub signature: Option<&'a str>,
    /// Value of the `X-Signature-Timestamp` header.
    pub timestamp: Option<&'a str>,
    /// The raw request body, exactly as received.
    pub body: &'a [u8],
}

/// The HTTP answer to send back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndpointResponse {
    pub status: u16,
    /// `None` means no `Content-Type` header is sent.
    pub content_type: Option<&'static str>,
    pub body: Vec<u8>,
}

impl EndpointResponse {
    fn unauthorized() -> Self {
        Self {
            status: 401,
            content_type: Some("text/plain"),
            body: INVALID_SIGNATURE.as_bytes().to_vec(),
        }
    }

    fn pong() -> Self {
        match json::to_vec(&CreateInteractionResponse::Pong) {
            Ok(body) => Self {
                status: 200,
                content_type: None,
                body,
            },
            Err(why) => Self::internal_error(&why),
        }
    }

    fn json(response: &CreateInteractionResponse) -> Self {
        match json::to_vec(response) {
            Ok(body) => Self {
                status: 200,
                content_type: Some("application/json"),
                body,
            },
            Err(why) => Self::internal_error(&why),
        }
    }

    fn internal_error(why: &crate::Error) -> Self {
        error!(error = %why, "failed to serialize interaction response");
        Self {
            status: 500,
            content_type: None,
            body: Vec::new(),
        }
    }
}

fn message(content: impl Into<String>) -> CreateInteractionResponse {
    CreateInteractionResponse::Message(CreateInteractionResponseMessage::new().content(content))
}

fn ephemeral(content: impl Into<String>) -> CreateInteractionResponse {
    CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new().content(content).ephemeral(true),
    )
}

/// Verifies, parses and routes interactions.
#[derive(Clone, Debug)]
pub struct InteractionDispatcher {
    verifier: Verifier,
    ledger: ThanksLedger,
}

impl InteractionDispatcher {
    pub fn new(verifier: Verifier, ledger: ThanksLedger) -> Self {
        Self {
            verifier,
            ledger,
        }
    }

    /// Handles one request from Discord.
    ///
    /// The signature is checked before the body is even parsed. Pings are answered with a bare
    /// pong. Everything else gets a JSON interaction response with status 200, including bodies
    /// that can't be understood, because Discord shows users an error for anything else.
    pub async fn handle(&self, request: EndpointRequest<'_>) -> EndpointResponse {
        if !self.authenticate(&request) {
            warn!(
                has_signature = request.signature.is_some(),
                has_timestamp = request.timestamp.is_some(),
                "rejecting request with an invalid signature"
            );
            return EndpointResponse::unauthorized();
        }

        let interaction = match json::from_slice::<Interaction>(request.body) {
            Ok(interaction) => interaction,
            Err(why) => {
                warn!(error = %why, "could not parse interaction");
                return EndpointResponse::json(&ephemeral(GENERIC_ERROR));
            },
        };

        match interaction {
            Interaction::Ping(_) => {
                debug!("answering ping");
                EndpointResponse::pong()
            },
            interaction => EndpointResponse::json(&self.route(interaction).await),
        }
    }

    fn authenticate(&self, request: &EndpointRequest<'_>) -> bool {
        match (request.signature, request.timestamp) {
            (Some(signature), Some(timestamp)) => {
                self.verifier.verify(signature, timestamp, request.body)
            },
            _ => false,
        }
    }

    /// Picks the handler for an already verified interaction.
    pub async fn route(&self, interaction: Interaction) -> CreateInteractionResponse {
        let command = match interaction {
            Interaction::Ping(_) => return CreateInteractionResponse::Pong,
            Interaction::Command(command) => command,
            Interaction::Other(kind) => {
                debug!(?kind, "ignoring unhandled interaction type");
                return ephemeral(GENERIC_ERROR);
            },
        };

        match command.data.name.as_str() {
            name if commands::is_thank(name) => self.thank_user(&command).await,
            commands::MY_THANKS => self.check_my_thanks(&command).await,
            name => {
                debug!(name, "ignoring unknown command");
                ephemeral(GENERIC_ERROR)
            },
        }
    }

    async fn thank_user(&self, command: &CommandInteraction) -> CreateInteractionResponse {
        let (Some(invoking), Some(thanked)) =
            (command.invoking_user_id(), thanked_user(&command.data))
        else {
            warn!(kind = ?command.data.kind(), "could not resolve both users of a thank");
            return ephemeral(GENERIC_ERROR);
        };

        if thanked == *invoking {
            debug!(user = %invoking, "refusing a self thank");
            return ephemeral(SELF_THANK);
        }

        match self.ledger.thank(&thanked).await {
            Ok(count) => {
                info!(from = %invoking, to = %thanked, count, "user thanked");
                message(format!(
                    "{} -- you received thanks from {}!",
                    thanked.mention(),
                    invoking.mention()
                ))
            },
            Err(why) => {
                error!(error = %why, user = %thanked, "failed to record thanks");
                ephemeral(GENERIC_ERROR)
            },
        }
    }

    async fn check_my_thanks(&self, command: &CommandInteraction) -> CreateInteractionResponse {
        let Some(user) = command.invoking_user_id() else {
            warn!("my_thanks invoked without a user");
            return ephemeral(GENERIC_ERROR);
        };

        match self.ledger.thanks_for(user).await {
            Ok(0) => message(NO_THANKS_YET),
            Ok(count) => message(format!("You've received {count} thanks :tada:")),
            Err(why) => {
                error!(error = %why, %user, "failed to read thanks");
                ephemeral(GENERIC_ERROR)
            },
        }
    }
}

/// The user a thank command is aimed at, depending on how it was invoked.
fn thanked_user(data: &CommandData) -> Option<UserId> {
    match &data.invocation {
        CommandInvocation::ChatInput(options) => options.first()?.as_user_id(),
        CommandInvocation::User(target) => Some(target.to_user_id()),
        CommandInvocation::Message(messages) => {
            if messages.len() > 1 {
                warn!(count = messages.len(), "several resolved messages, using an arbitrary one");
            }
            messages.target().map(|message| message.author.id.clone())
        },
        CommandInvocation::Unknown(kind) => {
            debug!(kind, "unknown command type");
            None
        },
    }
}

//! User information-related models.

use serde::{Deserialize, Serialize};

use super::id::UserId;

/// Information about a user.
///
/// Only the fields the thanks commands read are kept; everything else Discord sends is ignored.
///
/// [Discord docs](https://discord.com/developers/docs/resources/user#user-object).
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct User {
    /// The unique Id of the user.
    pub id: UserId,
    /// The account's username.
    #[serde(rename = "username", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Indicator of whether the user is a bot.
    #[serde(default)]
    pub bot: bool,
}

/// The guild member who invoked an interaction.
///
/// [Discord docs](https://discord.com/developers/docs/resources/guild#guild-member-object).
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[non_exhaustive]
pub struct Member {
    /// The member's user. Always present on interactions, but not on every member object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// The member's nickname, if present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nick: Option<String>,
}

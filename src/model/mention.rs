use std::fmt;

use super::id::UserId;
use super::user::User;

/// Allows something to be mentioned in a message.
pub trait Mentionable {
    /// Creates a [`Mention`] that will be able to notify the item.
    ///
    /// [`Mention`] implements [`Display`], so [`ToString::to_string()`] can be called on it, or
    /// inserted directly into a [`format_args!`] type of macro.
    ///
    /// [`Display`]: fmt::Display
    ///
    /// ```
    /// use thanks_bot::model::id::UserId;
    /// use thanks_bot::model::mention::Mentionable;
    ///
    /// let user = UserId::new("114941315417899012");
    /// assert_eq!(user.mention().to_string(), "<@114941315417899012>");
    /// ```
    fn mention(&self) -> Mention;
}

/// A struct that represents some way to insert a notification, link, or emoji into a message.
///
/// [`Display`] is the primary way of utilizing a [`Mention`], either in a [`format_args!`] type
/// of macro or with [`ToString::to_string()`].
///
/// [`Display`]: fmt::Display
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Mention {
    User(UserId),
}

impl fmt::Display for Mention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mention::User(id) => f.write_fmt(format_args!("<@{id}>")),
        }
    }
}

impl From<UserId> for Mention {
    fn from(id: UserId) -> Self {
        Mention::User(id)
    }
}

impl Mentionable for UserId {
    fn mention(&self) -> Mention {
        Mention::User(self.clone())
    }
}

impl Mentionable for User {
    fn mention(&self) -> Mention {
        self.id.mention()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mention() {
        let user = User {
            id: UserId::new("6"),
            name: None,
            bot: false,
        };

        assert_eq!(user.mention().to_string(), "<@6>");
        assert_eq!(Mention::from(UserId::new("U2")).to_string(), "<@U2>");
    }
}

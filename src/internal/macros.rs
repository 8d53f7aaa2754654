//! A set of macros for easily working with internals.

/// The macro forwards the generation to the `bitflags::bitflags!` macro and implements the
/// default (de)serialization for Discord's bitmask values.
///
/// Discord sends flags as plain integers, while the `serde` feature of `bitflags` uses the
/// textual flag names, so the impls are written by hand here.
macro_rules! bitflags {
    (
        $(#[$outer:meta])*
        $vis:vis struct $BitFlags:ident: $T:ty {
            $(
                $(#[$inner:ident $($args:tt)*])*
                const $Flag:ident = $value:expr;
            )*
        }
    ) => {
        ::bitflags::bitflags! {
            $(#[$outer])*
            $vis struct $BitFlags: $T {
                $(
                    $(#[$inner $($args)*])*
                    const $Flag = $value;
                )*
            }
        }

        impl<'de> ::serde::de::Deserialize<'de> for $BitFlags {
            fn deserialize<D: ::serde::de::Deserializer<'de>>(
                deserializer: D,
            ) -> ::std::result::Result<Self, D::Error> {
                Ok(Self::from_bits_truncate(<$T as ::serde::de::Deserialize>::deserialize(deserializer)?))
            }
        }

        impl ::serde::ser::Serialize for $BitFlags {
            fn serialize<S: ::serde::ser::Serializer>(
                &self,
                serializer: S,
            ) -> ::std::result::Result<S::Ok, S::Error> {
                ::serde::ser::Serialize::serialize(&self.bits(), serializer)
            }
        }
    };
}

/// The macro allows to create an enum represented by a Discord integer, with an `Unknown` variant
/// catching every value it does not know about.
///
/// Pair it with `#[serde(from = "u8", into = "u8")]` to get the (de)serialization.
macro_rules! enum_number {
    (
        $(#[$outer:meta])*
        $vis:vis enum $Enum:ident {
            $(
                $(#[doc = $doc:literal])*
                $Variant:ident = $value:literal,
            )*
            _ => Unknown($T:ty),
        }
    ) => {
        $(#[$outer])*
        $vis enum $Enum {
            $(
                $(#[doc = $doc])*
                $Variant,
            )*
            /// Variant value is unknown.
            Unknown($T),
        }

        impl From<$T> for $Enum {
            fn from(value: $T) -> Self {
                match value {
                    $($value => Self::$Variant,)*
                    unknown => Self::Unknown(unknown),
                }
            }
        }

        impl From<$Enum> for $T {
            fn from(value: $Enum) -> Self {
                match value {
                    $($Enum::$Variant => $value,)*
                    $Enum::Unknown(unknown) => unknown,
                }
            }
        }
    };
}

/// Declares snowflake id newtypes.
///
/// The ids keep the text Discord sent, which is also the key the thanks counters are stored
/// under. They deserialize from either a JSON string or integer.
macro_rules! id_string {
    ($($(#[$attr:meta])* $name:ident;)*) => {
        $(
            $(#[$attr])*
            #[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Serialize)]
            #[serde(transparent)]
            pub struct $name(Box<str>);

            impl $name {
                /// Creates a new id from its textual form.
                #[must_use]
                pub fn new(id: impl Into<Box<str>>) -> Self {
                    Self(id.into())
                }

                /// The id as it was received from Discord.
                #[must_use]
                pub fn as_str(&self) -> &str {
                    &self.0
                }
            }

            impl std::fmt::Display for $name {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(&self.0)
                }
            }

            impl AsRef<str> for $name {
                fn as_ref(&self) -> &str {
                    &self.0
                }
            }

            impl From<&str> for $name {
                fn from(id: &str) -> Self {
                    Self::new(id)
                }
            }

            impl From<String> for $name {
                fn from(id: String) -> Self {
                    Self::new(id)
                }
            }

            impl From<u64> for $name {
                fn from(id: u64) -> Self {
                    Self::new(id.to_string())
                }
            }

            impl<'de> serde::Deserialize<'de> for $name {
                fn deserialize<D: serde::Deserializer<'de>>(
                    deserializer: D,
                ) -> std::result::Result<Self, D::Error> {
                    deserializer.deserialize_any($crate::model::id::SnowflakeVisitor).map(Self)
                }
            }
        )*
    }
}

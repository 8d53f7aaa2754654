//! Contains tools related to Discord's Interactions Endpoint URL feature.
//!
//! Discord signs every interaction it POSTs to the endpoint with the application's Ed25519 key
//! and rejects the endpoint URL unless forged requests get a 401.
//!
//! <https://discord.com/developers/docs/interactions/receiving-and-responding#security-and-authorization>
//!
//! See [`Verifier`] for example usage.

/// Header carrying the hex encoded signature.
pub const SIGNATURE_HEADER: &str = "X-Signature-Ed25519";
/// Header carrying the timestamp that was signed along with the body.
pub const TIMESTAMP_HEADER: &str = "X-Signature-Timestamp";

/// Parses a hex string into an array of `[u8]`
fn parse_hex<const N: usize>(s: &str) -> Option<[u8; N]> {
    if s.len() != N * 2 {
        return None;
    }

    let mut res = [0; N];
    for (i, byte) in res.iter_mut().enumerate() {
        *byte = u8::from_str_radix(s.get(2 * i..2 * (i + 1))?, 16).ok()?;
    }
    Some(res)
}

/// The configured public key couldn't be used.
#[derive(Debug)]
pub enum InvalidKey {
    /// The key isn't a 64 digit hex string.
    NotHex,
    /// The bytes aren't a valid Ed25519 point.
    Signature(ed25519_dalek::SignatureError),
}

impl std::fmt::Display for InvalidKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotHex => f.write_str("invalid bot public key: expected a 64 digit hex string"),
            Self::Signature(inner) => write!(f, "invalid bot public key: {inner}"),
        }
    }
}

impl std::error::Error for InvalidKey {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotHex => None,
            Self::Signature(inner) => Some(inner),
        }
    }
}

/// Used to cryptographically verify incoming interactions HTTP request for authenticity.
///
/// ```rust
/// use thanks_bot::interactions_endpoint::Verifier;
///
/// let verifier =
///     Verifier::from_hex("67c6bd767ca099e79efac9fcce4d2022a63bf7dea780e7f3d813f694c1597089")?;
///
/// // When receiving an HTTP request:
/// # let (signature, timestamp, request_body) = ("", "", &[]);
/// if !verifier.verify(signature, timestamp, request_body) {
///     // Send HTTP 401 Unauthorized response
/// }
/// # Ok::<(), thanks_bot::interactions_endpoint::InvalidKey>(())
/// ```
#[derive(Clone, Debug)]
pub struct Verifier {
    public_key: ed25519_dalek::VerifyingKey,
}

impl Verifier {
    /// Creates a new [`Verifier`] from the public key hex string shown in the developer portal.
    ///
    /// # Errors
    ///
    /// [`InvalidKey`] if the string isn't 64 hex digits or the key isn't cryptographically valid.
    pub fn from_hex(public_key: &str) -> Result<Self, InvalidKey> {
        Self::try_new(parse_hex(public_key.trim()).ok_or(InvalidKey::NotHex)?)
    }

    /// Creates a new [`Verifier`] from the public key bytes.
    ///
    /// # Errors
    ///
    /// [`InvalidKey`] if the key isn't cryptographically valid.
    pub fn try_new(public_key: [u8; 32]) -> Result<Self, InvalidKey> {
        Ok(Self {
            public_key: ed25519_dalek::VerifyingKey::from_bytes(&public_key)
                .map_err(InvalidKey::Signature)?,
        })
    }

    /// Verifies a Discord request for authenticity, given the `X-Signature-Ed25519` HTTP header,
    /// `X-Signature-Timestamp` HTTP headers and request body.
    ///
    /// The signature covers the timestamp followed by the raw body. A signature that isn't 128
    /// hex digits fails verification.
    #[must_use]
    pub fn verify(&self, signature: &str, timestamp: &str, body: &[u8]) -> bool {
        use ed25519_dalek::Verifier as _;

        let Some(signature_bytes) = parse_hex(signature) else {
            return false;
        };
        let signature = ed25519_dalek::Signature::from_bytes(&signature_bytes);

        let message_to_verify = [timestamp.as_bytes(), body].concat();
        self.public_key.verify(&message_to_verify, &signature).is_ok()
    }
}

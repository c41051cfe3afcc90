/// HMAC-SHA256 request body signer
pub mod hmac_signer;

use base64::engine::{general_purpose::STANDARD as BASE64, Engine};
pub use hmac_signer::*;

use crate::error::{Error, Result};

/// Trait for producing integrity signatures over request bodies.
///
/// Implementations must be safe to share between concurrent identity checks:
/// `sign` takes `&self` and must not mutate shared state.
pub trait Signer: Send + Sync {
    /// Signs the provided data and returns the raw signature bytes.
    ///
    /// # Arguments
    ///
    /// * `data` - The exact bytes to sign.
    fn sign(&self, data: &[u8]) -> Result<Vec<u8>>;

    /// Signs a text payload and returns the Base64 encoded signature.
    ///
    /// The signature covers the UTF-8 bytes of `payload` exactly as given, so
    /// callers must pass the body as it will appear on the wire.
    ///
    /// # Arguments
    ///
    /// * `payload` - The text to sign. `None` is rejected; an empty string is signed.
    ///
    /// # Returns
    ///
    /// The signature as standard, padded Base64.
    fn sign_payload(&self, payload: Option<&str>) -> Result<String> {
        let payload =
            payload.ok_or_else(|| Error::InvalidArgument("The input must not be null".to_owned()))?;
        let sig = self.sign(payload.as_bytes())?;

        Ok(BASE64.encode(sig))
    }
}

use std::fmt;

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::{
    error::{Error, Result},
    signer::Signer,
};

type HmacSha256 = Hmac<Sha256>;

/// Signs request bodies with HMAC-SHA256 using a shared secret.
#[derive(Clone)]
pub struct HmacSigner {
    secret_key: Vec<u8>,
}

impl HmacSigner {
    /// Creates a signer from the shared secret agreed with the provider.
    ///
    /// # Arguments
    ///
    /// * `secret_key` - Key material. Its bytes are used as-is.
    ///
    /// # Returns
    ///
    /// A new `HmacSigner`, or `Error::InvalidKey` if the key is empty or rejected by HMAC-SHA256.
    pub fn new(secret_key: impl AsRef<[u8]>) -> Result<Self> {
        let secret_key = secret_key.as_ref();
        if secret_key.is_empty() {
            return Err(Error::InvalidKey("HMAC key must not be empty".to_owned()));
        }

        // Fail at construction rather than on the first request.
        HmacSha256::new_from_slice(secret_key).map_err(|e| Error::InvalidKey(e.to_string()))?;

        Ok(HmacSigner {
            secret_key: secret_key.to_vec(),
        })
    }
}

impl Signer for HmacSigner {
    fn sign(&self, data: &[u8]) -> Result<Vec<u8>> {
        log::trace!("Signing {} bytes with HMAC-SHA256", data.len());
        let mut mac = HmacSha256::new_from_slice(&self.secret_key)
            .map_err(|e| Error::InvalidKey(e.to_string()))?;
        mac.update(data);

        Ok(mac.finalize().into_bytes().to_vec())
    }
}

impl fmt::Debug for HmacSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HmacSigner")
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

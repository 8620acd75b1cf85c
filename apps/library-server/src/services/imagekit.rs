//! Image host upload authentication.
//!
//! Browsers upload files straight to the image host. Each upload carries a
//! one-time token, an expiry and an HMAC-SHA1 signature over both, keyed
//! by the private key that never leaves this server.

use std::fmt;

use chrono::Utc;
use hmac::{digest::InvalidLength, Hmac, Mac};
use sha1::Sha1;
use uuid::Uuid;

use crate::config::Config;

type HmacSha1 = Hmac<Sha1>;

/// Seconds an upload signature stays valid.
pub const DEFAULT_EXPIRY_SECS: i64 = 60 * 30;

/// Signed parameters for one client-side upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationParameters {
    pub token: String,
    pub expire: i64,
    pub signature: String,
}

/// Handle for the image host, built once from configuration.
///
/// Only the private key is held, already loaded into the MAC. The public
/// key and URL endpoint are consumed by the browser upload widget.
#[derive(Clone)]
pub struct ImageKitAuth {
    mac: HmacSha1,
}

impl ImageKitAuth {
    /// Creates a handle from the account's private key.
    pub fn new(private_key: &str) -> Result<Self, InvalidLength> {
        Ok(Self {
            mac: HmacSha1::new_from_slice(private_key.as_bytes())?,
        })
    }

    /// Creates a handle if the image host is fully configured.
    pub fn from_config(config: &Config) -> Result<Option<Self>, InvalidLength> {
        config
            .imagekit_keys()
            .map(|(_, private_key, _)| Self::new(private_key))
            .transpose()
    }

    /// Issues parameters with a fresh token, valid for [`DEFAULT_EXPIRY_SECS`].
    pub fn authentication_parameters(&self) -> AuthenticationParameters {
        let token = Uuid::new_v4().to_string();
        let expire = Utc::now().timestamp() + DEFAULT_EXPIRY_SECS;
        self.authentication_parameters_with(token, expire)
    }

    /// Signs a caller-chosen token and expiry.
    pub fn authentication_parameters_with(
        &self,
        token: impl Into<String>,
        expire: i64,
    ) -> AuthenticationParameters {
        let token = token.into();
        let mut mac = self.mac.clone();
        mac.update(token.as_bytes());
        mac.update(expire.to_string().as_bytes());
        let signature = hex::encode(mac.finalize().into_bytes());

        AuthenticationParameters {
            token,
            expire,
            signature,
        }
    }
}

impl fmt::Debug for ImageKitAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageKitAuth").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth() -> ImageKitAuth {
        ImageKitAuth::new("private_key_test").unwrap()
    }

    #[test]
    fn test_signature_is_hmac_sha1_of_token_and_expire() {
        let params = auth()
            .authentication_parameters_with("1bab386f-45ea-49e1-9f0d-6afe49a5b250", 1655379200);

        assert_eq!(params.signature, "e5b61d81df8ce6f981125e9b3c346523e54b9c4f");
        assert_eq!(params.expire, 1655379200);
    }

    #[test]
    fn test_fresh_parameters() {
        let auth = auth();
        let before = Utc::now().timestamp();

        let first = auth.authentication_parameters();
        let second = auth.authentication_parameters();

        assert_ne!(first.token, second.token);
        assert_ne!(first.signature, second.signature);
        assert!(first.expire >= before + DEFAULT_EXPIRY_SECS);
        assert_eq!(first.signature.len(), 40);
    }

    #[test]
    fn test_debug_hides_private_key() {
        let debug = format!("{:?}", auth());
        assert!(debug.starts_with("ImageKitAuth"));
        assert!(!debug.contains("private_key_test"));
    }

    #[test]
    fn test_from_config_requires_all_keys() {
        let mut config = Config::from_lookup(|_| None).unwrap();
        assert!(ImageKitAuth::from_config(&config).unwrap().is_none());

        config.imagekit_public_key = Some("public_key_test".to_string());
        config.imagekit_private_key = Some("private_key_test".to_string());
        assert!(ImageKitAuth::from_config(&config).unwrap().is_none());

        config.imagekit_url_endpoint = Some("https://ik.example.com/library".to_string());
        let configured = ImageKitAuth::from_config(&config).unwrap().unwrap();
        assert_eq!(
            configured.authentication_parameters_with("token", 1),
            auth().authentication_parameters_with("token", 1)
        );
    }
}

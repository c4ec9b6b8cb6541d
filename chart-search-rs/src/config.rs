use crate::error::Result;
use reqwest::Client;
use std::time::Duration;

const USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko)";

/// Secrets handed to the Spotify and Genius clients.
///
/// Tokens are passed through exactly as given.
#[derive(Clone)]
pub struct Credentials {
    pub spotify_client_id: String,
    pub spotify_client_secret: String,
    pub genius_token: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("spotify_client_id", &self.spotify_client_id)
            .field("spotify_client_secret", &"<redacted>")
            .field("genius_token", &"<redacted>")
            .finish()
    }
}

/// Base URLs of every remote service, without trailing slashes.
#[derive(Debug, Clone)]
pub struct ServiceEndpoints {
    pub billboard: String,
    pub spotify_accounts: String,
    pub spotify_api: String,
    pub genius_api: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for ServiceEndpoints {
    fn default() -> Self {
        Self {
            billboard: "https://www.billboard.com".to_string(),
            spotify_accounts: "https://accounts.spotify.com".to_string(),
            spotify_api: "https://api.spotify.com".to_string(),
            genius_api: "https://api.genius.com".to_string(),
            timeout: None,
        }
    }
}

impl ServiceEndpoints {
    pub(crate) fn http_client(&self) -> Result<Client> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_hides_secrets() {
        let credentials = Credentials {
            spotify_client_id: "cid".to_string(),
            spotify_client_secret: "very-secret".to_string(),
            genius_token: "genius-secret".to_string(),
        };
        let printed = format!("{:?}", credentials);
        assert!(printed.contains("cid"));
        assert!(!printed.contains("very-secret"));
        assert!(!printed.contains("genius-secret"));
    }

    #[test]
    fn test_default_endpoints_have_no_trailing_slash() {
        let endpoints = ServiceEndpoints::default();
        for url in [
            &endpoints.billboard,
            &endpoints.spotify_accounts,
            &endpoints.spotify_api,
            &endpoints.genius_api,
        ] {
            assert!(!url.ends_with('/'), "{} ends with a slash", url);
        }
        assert!(endpoints.timeout.is_none());
    }
}

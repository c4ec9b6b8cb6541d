use chart_search_rs::{Credentials, ServiceEndpoints};
use clap::Args;
use std::path::PathBuf;
use std::time::Duration;

/// Files the batch reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub cache_path: PathBuf,
    pub export_path: PathBuf,
    pub cmudict_path: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            cache_path: PathBuf::from("cache.json"),
            export_path: PathBuf::from("data.json"),
            cmudict_path: PathBuf::from("cmudict.dict"),
        }
    }
}

/// Credentials and connection settings for the remote services.
#[derive(Args, Debug, Clone)]
pub struct ServiceArgs {
    /// Spotify client id
    #[arg(long, env = "SPOTIFY_CID", hide_env_values = true)]
    pub spotify_client_id: String,

    /// Spotify client secret
    #[arg(long, env = "SPOTIFY_SECRET", hide_env_values = true)]
    pub spotify_client_secret: String,

    /// Genius API access token
    #[arg(long, env = "GENIUS_TOKEN", hide_env_values = true)]
    pub genius_token: String,

    /// Per-request timeout in seconds (no timeout when omitted)
    #[arg(long)]
    pub http_timeout_secs: Option<u64>,
}

impl ServiceArgs {
    pub fn credentials(&self) -> Credentials {
        Credentials {
            spotify_client_id: self.spotify_client_id.clone(),
            spotify_client_secret: self.spotify_client_secret.clone(),
            genius_token: self.genius_token.clone(),
        }
    }

    pub fn endpoints(&self) -> ServiceEndpoints {
        ServiceEndpoints {
            timeout: self.http_timeout_secs.map(Duration::from_secs),
            ..ServiceEndpoints::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        services: ServiceArgs,
    }

    #[test]
    fn test_service_args_from_flags() {
        let cli = TestCli::parse_from([
            "test",
            "--spotify-client-id",
            "cid",
            "--spotify-client-secret",
            "secret",
            "--genius-token",
            "token",
            "--http-timeout-secs",
            "30",
        ]);

        let credentials = cli.services.credentials();
        assert_eq!(credentials.spotify_client_id, "cid");
        assert_eq!(credentials.genius_token, "token");

        let endpoints = cli.services.endpoints();
        assert_eq!(endpoints.timeout, Some(Duration::from_secs(30)));
        assert_eq!(endpoints.billboard, ServiceEndpoints::default().billboard);
    }

    #[test]
    fn test_default_paths() {
        let config = PipelineConfig::default();
        assert_eq!(config.cache_path, PathBuf::from("cache.json"));
        assert_eq!(config.export_path, PathBuf::from("data.json"));
    }
}

use crate::error::{ChartSearchError, Result};
use crate::spotify::models::ErrorResponse;
use reqwest::Response;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

/// Read a JSON body, turning non-2xx statuses into [`ChartSearchError::Api`].
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    let status = response.status();
    let text = response.text().await?;
    debug!("{} response ({}), length: {} bytes", what, status, text.len());

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorResponse>(&text)
            .map(|e| e.message())
            .unwrap_or(text);
        error!("{} request failed with status {}: {}", what, status, message);
        return Err(ChartSearchError::Api {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str(&text).map_err(|e| {
        error!("Failed to parse {} response: {}", what, e);
        ChartSearchError::JsonParse(e)
    })
}

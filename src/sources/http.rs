use crate::sources::error::SourceError;
use log::{debug, warn};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// GETs `url` with `query` and decodes the body as JSON.
///
/// `url` is what error messages mention, so it must not carry credentials; put those
/// in `query`.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    query: &[(&str, String)],
) -> Result<T, SourceError> {
    debug!("Requesting {}", url);
    let response = client
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(|e| SourceError::NetworkRequest(url.to_string(), e.without_url()))?;

    let response = match response.error_for_status() {
        Ok(resp) => resp,
        Err(e) => {
            let e = e.without_url();
            warn!("HTTP error for {}: {:?}", url, e);
            return Err(if let Some(status) = e.status() {
                SourceError::HttpStatus {
                    url: url.to_string(),
                    status,
                    source: e,
                }
            } else {
                SourceError::NetworkRequest(url.to_string(), e)
            });
        }
    };

    let bytes = response
        .bytes()
        .await
        .map_err(|e| SourceError::NetworkRequest(url.to_string(), e.without_url()))?;
    serde_json::from_slice(&bytes).map_err(|source| SourceError::JsonParse {
        url: url.to_string(),
        source,
    })
}

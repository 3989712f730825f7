use reqwest::StatusCode;

use crate::dom;

/// An HTTP client for the conversion server, shared by the wasm controller
/// and the integration tests.
#[derive(Clone)]
pub struct ApiClient {
    pub address: String,
    pub inner_client: reqwest::Client,
}

impl ApiClient {
    pub fn new(address: String) -> Self {
        Self {
            address,
            inner_client: reqwest::Client::new(),
        }
    }

    pub async fn health_check(&self) -> Result<(), ClientError> {
        let response = self
            .inner_client
            .get(format!("{}/health_check", self.address))
            .send()
            .await?;
        ok_empty(response).await
    }

    /// Fetch the page document for a query string, the way the controller's
    /// partial-update path does. The server returns the full document; the
    /// caller extracts the fragment it needs.
    pub async fn fetch_page(&self, query: &str) -> Result<String, ClientError> {
        let mut url = format!("{}/", self.address);
        if !query.is_empty() {
            url.push('?');
            url.push_str(query);
        }
        let (header, value) = dom::FETCH_HEADER;
        let response = self
            .inner_client
            .get(url)
            .header(header, value)
            .send()
            .await?;
        ok_text(response).await
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// An unhandled server error to display, containing response text.
    #[error("{1}")]
    APIError(StatusCode, String),
    #[error("Network error. Please check your connection.")]
    Network(#[from] reqwest::Error),
}

async fn ok_empty(response: reqwest::Response) -> Result<(), ClientError> {
    if !response.status().is_success() {
        return Err(ClientError::APIError(
            response.status(),
            response.text().await?,
        ));
    }
    Ok(())
}

async fn ok_text(response: reqwest::Response) -> Result<String, ClientError> {
    if !response.status().is_success() {
        return Err(ClientError::APIError(
            response.status(),
            response.text().await?,
        ));
    }
    Ok(response.text().await?)
}

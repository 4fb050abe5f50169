use crate::backend::{decode_object, transport_failure, Backend};
use crate::errors::ClientError;
use crate::models::{ClientRecord, TrackingResult};
use tracing::{debug, info};

pub const EMPTY_CODE_MESSAGE: &str = "please enter a tracking code";

/// Tracking codes are case-insensitive; the backend stores them uppercased.
pub fn normalize_code(raw: &str) -> Result<String, ClientError> {
    let code = raw.trim().to_uppercase();
    if code.is_empty() {
        return Err(ClientError::validation(EMPTY_CODE_MESSAGE));
    }
    Ok(code)
}

#[derive(Debug, Clone)]
pub struct TrackingClient {
    backend: Backend,
}

impl TrackingClient {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }

    /// Looks a record up by code with a single `GET /track`.
    ///
    /// `Err` is only ever [`ClientError::Validation`], returned before any
    /// request when the code is blank. Backend and network failures come back
    /// as [`TrackingResult`] variants.
    pub async fn fetch_by_code(&self, code: &str) -> Result<TrackingResult, ClientError> {
        let code = normalize_code(code)?;
        Ok(match self.request(&code).await {
            Ok(record) => match record.error {
                Some(message) => {
                    info!(%code, "tracking code not found");
                    TrackingResult::NotFound(message)
                }
                None => TrackingResult::Found(record),
            },
            Err(_) => TrackingResult::TransportError,
        })
    }

    async fn request(&self, code: &str) -> Result<ClientRecord, ClientError> {
        let mut url = self.backend.endpoint(&["track"])?;
        url.query_pairs_mut().append_pair("code", code);
        debug!(%url, "fetching tracking record");

        let response = self
            .backend
            .http()
            .get(url)
            .send()
            .await
            .map_err(|err| transport_failure("track", err))?;
        // Error payloads arrive with 4xx statuses, so the body is read regardless.
        decode_object(response, "track", &["name", "error"]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_uppercases() {
        assert_eq!(normalize_code(" ab3 ").unwrap(), "AB3");
        assert_eq!(normalize_code("\tx9y\n").unwrap(), "X9Y");
    }

    #[test]
    fn blank_code_is_a_validation_error() {
        assert_eq!(
            normalize_code("   "),
            Err(ClientError::Validation(EMPTY_CODE_MESSAGE.to_string()))
        );
    }
}

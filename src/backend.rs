use crate::errors::ClientError;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

/// Shared HTTP handle to the tracking backend.
#[derive(Debug, Clone)]
pub struct Backend {
    http: Client,
    base_url: Url,
}

impl Backend {
    pub fn new(base_url: Url) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    /// Joins path segments onto the base url, percent-encoding each one.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Transport)?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

pub(crate) async fn decode_json<T: DeserializeOwned>(
    response: reqwest::Response,
    what: &str,
) -> Result<T, ClientError> {
    response.json::<T>().await.map_err(|err| {
        warn!("failed to decode {what} response: {err}");
        ClientError::Transport
    })
}

/// Decodes a single JSON object carrying at least one of `keys`.
///
/// Every backend record is an object; arrays, scalars and objects missing
/// all of the expected keys count as a broken reply.
pub(crate) async fn decode_object<T: DeserializeOwned>(
    response: reqwest::Response,
    what: &str,
    keys: &[&str],
) -> Result<T, ClientError> {
    let value: Value = decode_json(response, what).await?;
    object_from_value(value, what, keys)
}

fn object_from_value<T: DeserializeOwned>(
    value: Value,
    what: &str,
    keys: &[&str],
) -> Result<T, ClientError> {
    let recognized = value
        .as_object()
        .is_some_and(|object| keys.iter().any(|key| object.contains_key(*key)));
    if !recognized {
        warn!("unexpected {what} payload shape");
        return Err(ClientError::Transport);
    }
    serde_json::from_value(value).map_err(|err| {
        warn!("failed to decode {what} response: {err}");
        ClientError::Transport
    })
}

pub(crate) fn transport_failure(what: &str, err: reqwest::Error) -> ClientError {
    warn!("{what} request failed: {err}");
    ClientError::Transport
}

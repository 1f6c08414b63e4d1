use log::debug;
use reqwest::{blocking::Client, StatusCode};
use serde::Deserialize;

#[derive(Deserialize, Debug)]
struct DataMessageJson {
    message: String,
}

/// What a completed round trip to the data endpoint produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The endpoint answered 200 OK with a decodable body.
    Received(String),
    /// The endpoint answered with a non-OK status. The body is not read and
    /// the caller is expected to leave its display untouched.
    Skipped { status: StatusCode },
}

/// Performs one blocking GET against the data endpoint and decodes the
/// message out of the response.
///
/// The call does not return until the server answers or the request fails.
/// There are no retries and no timeout beyond what the operating system
/// applies to the underlying connection. A non-OK status is not an error,
/// it is reported as [`FetchOutcome::Skipped`].
pub fn fetch_message(endpoint: &str) -> Result<FetchOutcome, MessageFetchError> {
    let client = http_client().map_err(|e| MessageFetchError {
        endpoint: endpoint.to_string(),
        r#type: MessageFetchErrorType::Client { source: e.into() },
    })?;

    let response = client.get(endpoint).send().map_err(|e| MessageFetchError {
        endpoint: endpoint.to_string(),
        r#type: MessageFetchErrorType::Request { source: e.into() },
    })?;

    let status = response.status();
    if status != StatusCode::OK {
        debug!("Endpoint {} answered {}, skipping", endpoint, status);
        return Ok(FetchOutcome::Skipped { status });
    }

    let body = response.text().map_err(|e| MessageFetchError {
        endpoint: endpoint.to_string(),
        r#type: MessageFetchErrorType::Body { source: e.into() },
    })?;

    let data = serde_json::from_str::<DataMessageJson>(&body).map_err(|e| MessageFetchError {
        endpoint: endpoint.to_string(),
        r#type: MessageFetchErrorType::Decode { source: e.into() },
    })?;

    debug!("Endpoint {} answered with message of {} bytes", endpoint, data.message.len());
    Ok(FetchOutcome::Received(data.message))
}

// A fresh client per request. The program issues at most one request per
// button activation, so there is no connection state worth keeping.
fn http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(format!("postbox/{}", env!("CARGO_PKG_VERSION")))
        .build()
}

pub use error::{MessageFetchError, MessageFetchErrorType};
mod error;

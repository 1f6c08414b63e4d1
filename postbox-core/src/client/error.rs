use std::{error::Error, fmt};

// Cannot use thiserror::Error derive macros because all error enum types require a common
// endpoint variable. There is probably a way to make it work in the thiserror library, but
// currently thiserror does not provide that functionality
#[derive(Debug)]
pub struct MessageFetchError {
    pub endpoint: String,
    pub r#type: MessageFetchErrorType,
}
#[derive(Debug)]
pub enum MessageFetchErrorType {
    Client { source: anyhow::Error },
    Request { source: anyhow::Error },
    Body { source: anyhow::Error },
    Decode { source: anyhow::Error },
}
impl fmt::Display for MessageFetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> std::fmt::Result {
        // Sources render with {:#} so the label text carries the whole cause
        // chain, not just the outermost context
        match &self.r#type {
            MessageFetchErrorType::Client { source } =>
                write!(f, "Error building http client: {:#}", source),
            MessageFetchErrorType::Request { source } =>
                write!(f, "Error sending request to {}: {:#}", self.endpoint, source),
            MessageFetchErrorType::Body { source } =>
                write!(f, "Error reading response body from {}: {:#}", self.endpoint, source),
            MessageFetchErrorType::Decode { source } =>
                write!(f, "Error decoding response body from {}: {:#}", self.endpoint, source),
        }
    }
}
impl Error for MessageFetchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.r#type {
            MessageFetchErrorType::Client { source } => Some(&**source),
            MessageFetchErrorType::Request { source } => Some(&**source),
            MessageFetchErrorType::Body { source } => Some(&**source),
            MessageFetchErrorType::Decode { source } => Some(&**source),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::ErrorKind;

    use super::*;

    #[test]
    fn display_includes_endpoint_and_cause_chain() {
        let source = anyhow::Error::new(std::io::Error::new(
                ErrorKind::ConnectionRefused,
                "connection refused",
            ))
            .context("tcp connect error");
        let error = MessageFetchError {
            endpoint: "http://localhost:5000/get-data".to_string(),
            r#type: MessageFetchErrorType::Request { source },
        };

        let rendered = error.to_string();

        assert!(rendered.contains("http://localhost:5000/get-data"));
        assert!(rendered.contains("tcp connect error"));
        assert!(rendered.contains("connection refused"));
    }
}

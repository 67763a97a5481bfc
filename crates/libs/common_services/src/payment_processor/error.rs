use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Failed to build request URL: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Payment processor returned an error: {0}")]
    RemoteServerError(String),

    #[error("Unexpected payment processor response: {0}")]
    UnexpectedResponse(String),
}

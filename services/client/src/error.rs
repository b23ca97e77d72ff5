/// Every failed request ends up as one of these, and its `Display` is the
/// message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// The server answered with a non-success status.
    #[error("Error: {status} - {body}")]
    Response { status: u16, body: String },
    /// The request went out but nothing came back.
    #[error("Network Error: Unable to reach the server")]
    Network,
    #[error("Error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_connect() || error.is_timeout() || error.is_request() {
            ClientError::Network
        } else {
            ClientError::Other(error.to_string())
        }
    }
}

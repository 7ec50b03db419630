use axum::http::StatusCode;

/// Failure taxonomy shared by checkout initiation and order routing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommerceError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Configuration(String),
    #[error("{0}")]
    Validation(String),
    #[error("{message}")]
    VendorApi {
        vendor: String,
        status: Option<u16>,
        message: String,
    },
    #[error("{0}")]
    NotImplemented(String),
    #[error("{0}")]
    PaymentProvider(String),
}

impl CommerceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CommerceError::NotFound(_) => StatusCode::NOT_FOUND,
            CommerceError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CommerceError::Validation(_) => StatusCode::BAD_REQUEST,
            CommerceError::VendorApi { .. } | CommerceError::PaymentProvider(_) => {
                StatusCode::BAD_GATEWAY
            }
            CommerceError::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
        }
    }
}

/// Failure reported by an outbound HTTP adapter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("upstream returned status {status}")]
    Status { status: u16, body: String },
    #[error("unexpected upstream response: {0}")]
    Decode(String),
}

impl From<ureq::Error> for GatewayError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, response) => GatewayError::Status {
                status,
                body: response.into_string().unwrap_or_default(),
            },
            ureq::Error::Transport(transport) => GatewayError::Transport(transport.to_string()),
        }
    }
}

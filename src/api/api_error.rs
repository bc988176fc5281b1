use crate::update::Outcome;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

impl Outcome {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Outcome::Success => StatusCode::OK,
            Outcome::AuthDenied => StatusCode::FORBIDDEN,
            Outcome::BadRequest(_) | Outcome::ProtocolFailure(_) => StatusCode::BAD_REQUEST,
            Outcome::TransportFailure(_) => StatusCode::FAILED_DEPENDENCY,
        }
    }
}

impl IntoResponse for Outcome {
    fn into_response(self) -> Response {
        (self.status(), self.body()).into_response()
    }
}

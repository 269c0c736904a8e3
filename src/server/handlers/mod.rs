//! HTTP handlers for the server.

pub mod api;
pub mod debug;
pub mod forms;

use axum::http::StatusCode;

use crate::error::OverprintError;
use crate::form::FormInput;
use crate::templates::{self, Template};

/// Error half of every fallible handler.
pub type HandlerError = (StatusCode, String);

/// Map a library error to a status code and message.
pub fn error_response(err: OverprintError) -> HandlerError {
    let status = match &err {
        OverprintError::UnknownTemplate(_) => StatusCode::NOT_FOUND,
        OverprintError::NotReady(_) => StatusCode::SERVICE_UNAVAILABLE,
        OverprintError::Asset(_)
        | OverprintError::PageLoad(_)
        | OverprintError::Image(_)
        | OverprintError::Http(_) => StatusCode::BAD_GATEWAY,
        OverprintError::Room(_) => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        tracing::error!(error = %err, "request failed");
    }
    (status, err.to_string())
}

/// Registered template or 404.
pub fn lookup(id: &str) -> Result<&'static dyn Template, HandlerError> {
    templates::by_id(id).ok_or_else(|| error_response(OverprintError::UnknownTemplate(id.to_string())))
}

/// Normalize raw request state and fill in the template's defaults.
pub fn prepare_input(template: &dyn Template, raw: &FormInput, defaults: &FormInput) -> FormInput {
    raw.normalize(template.inputs()).or_defaults(defaults)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(error_response(OverprintError::UnknownTemplate("x".into())).0, StatusCode::NOT_FOUND);
        assert_eq!(error_response(OverprintError::NotReady("x".into())).0, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(error_response(OverprintError::Asset("x".into())).0, StatusCode::BAD_GATEWAY);
        assert_eq!(error_response(OverprintError::PageLoad("x".into())).0, StatusCode::BAD_GATEWAY);
        assert_eq!(error_response(OverprintError::Room("x".into())).0, StatusCode::CONFLICT);
        assert_eq!(
            error_response(OverprintError::Config("x".into())).0,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_lookup() {
        assert!(lookup("lg-story").is_ok());
        let (status, message) = lookup("nope").err().unwrap();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(message.contains("nope"));
    }
}

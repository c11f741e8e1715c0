use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;

use crate::error::MimicError;

/// `Json` whose rejections come back in the v1 error envelope.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(MimicError))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for MimicError {
    fn from(rejection: JsonRejection) -> Self {
        // The body limit surfaces as a bytes rejection carrying 413.
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return MimicError::BodyTooLarge(
                "Request body exceeds MIMIC_MAX_BODY_BYTES".to_string(),
            );
        }

        let detail = rejection.body_text();
        match rejection {
            JsonRejection::JsonDataError(_) => match missing_field(&detail) {
                Some(field) => MimicError::Validation(format!("Missing required field: {field}")),
                None => MimicError::Validation(format!("Invalid JSON: {detail}")),
            },
            JsonRejection::JsonSyntaxError(_) => {
                MimicError::Validation(format!("JSON syntax error: {detail}"))
            }
            JsonRejection::MissingJsonContentType(_) => MimicError::Validation(
                "Missing `Content-Type: application/json` header".to_string(),
            ),
            JsonRejection::BytesRejection(_) => {
                MimicError::Validation(format!("Unreadable request body: {detail}"))
            }
            _ => MimicError::Validation(detail),
        }
    }
}

/// Field name from serde's "missing field `x`" message.
fn missing_field(message: &str) -> Option<&str> {
    let (_, rest) = message.split_once("missing field `")?;
    rest.split_once('`').map(|(field, _)| field)
}

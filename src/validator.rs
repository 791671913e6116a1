use anyhow::anyhow;
use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use registrar_core::AppError;

/// Joins validation messages, sorted by field, without repeating a message
/// shared by several fields.
fn format_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    let mut messages: Vec<String> = Vec::new();
    for (field, errors) in fields {
        for error in errors.iter() {
            let message = error
                .message
                .as_ref()
                .map(|msg| msg.to_string())
                .unwrap_or_else(|| format!("{} is invalid", field));
            if !messages.contains(&message) {
                messages.push(message);
            }
        }
    }

    messages.join(", ")
}

/// Maps a serde error text onto a client-facing message.
fn body_error(error_msg: &str) -> AppError {
    if error_msg.contains("missing field") {
        let field = error_msg
            .split("missing field `")
            .nth(1)
            .and_then(|s| s.split('`').next())
            .unwrap_or("unknown");
        return AppError::new(StatusCode::BAD_REQUEST, anyhow!("{} is required", field));
    }

    if let Some(start) = error_msg.find("unknown variant") {
        let detail = &error_msg[start..];
        let detail = detail.split(" at line").next().unwrap_or(detail);
        return AppError::new(StatusCode::BAD_REQUEST, anyhow!("Invalid value: {}", detail));
    }

    if error_msg.contains("invalid type") {
        return AppError::new(
            StatusCode::BAD_REQUEST,
            anyhow!("Invalid field type in request"),
        );
    }

    AppError::new(StatusCode::BAD_REQUEST, anyhow!("Invalid request body"))
}

fn validate<T: Validate>(value: T) -> Result<T, AppError> {
    value.validate().map_err(|errors| {
        AppError::new(
            StatusCode::BAD_REQUEST,
            anyhow!("{}", format_errors(&errors)),
        )
    })?;
    Ok(value)
}

/// Deserializes and validates a raw request body.
///
/// Used by handlers that must run their authorization checks before the body
/// is looked at.
pub fn parse_json<T>(body: &Bytes) -> Result<T, AppError>
where
    T: DeserializeOwned + Validate,
{
    let value: T = serde_json::from_slice(body).map_err(|e| body_error(&e.to_string()))?;
    validate(value)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
                    return AppError::new(
                        StatusCode::BAD_REQUEST,
                        anyhow!("Missing 'Content-Type: application/json' header"),
                    );
                }

                body_error(&rejection.body_text())
            })?;

        Ok(ValidatedJson(validate(value)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use registrar_models::auth::RegisterRequest;
    use registrar_models::students::CreateStudentDto;

    fn message(err: AppError) -> String {
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        err.error.to_string()
    }

    #[test]
    fn test_missing_field() {
        let body = Bytes::from_static(br#"{"email":"a@x.com","password":"secret1"}"#);
        let err = parse_json::<RegisterRequest>(&body).unwrap_err();
        assert_eq!(message(err), "role is required");
    }

    #[test]
    fn test_unknown_role() {
        let body =
            Bytes::from_static(br#"{"email":"a@x.com","password":"secret1","role":"root"}"#);
        let msg = message(parse_json::<RegisterRequest>(&body).unwrap_err());
        assert!(msg.starts_with("Invalid value: unknown variant `root`"), "{msg}");
        assert!(!msg.contains("line"), "{msg}");
    }

    #[test]
    fn test_invalid_type_and_garbage() {
        let body = Bytes::from_static(br#"{"name":"Ann","surname":"Lee","group_id":"one"}"#);
        let msg = message(parse_json::<CreateStudentDto>(&body).unwrap_err());
        assert_eq!(msg, "Invalid field type in request");

        let body = Bytes::from_static(b"not json");
        let msg = message(parse_json::<CreateStudentDto>(&body).unwrap_err());
        assert_eq!(msg, "Invalid request body");
    }

    #[test]
    fn test_shared_messages_are_not_repeated() {
        let body = Bytes::from_static(br#"{"name":" ","surname":""}"#);
        let msg = message(parse_json::<CreateStudentDto>(&body).unwrap_err());
        assert_eq!(msg, "Name and surname are required");
    }

    #[test]
    fn test_valid_body() {
        let body = Bytes::from_static(br#"{"name":"Ann","surname":"Lee","group_id":3}"#);
        let dto = parse_json::<CreateStudentDto>(&body).unwrap();
        assert_eq!(dto.group_id, Some(3));
    }
}

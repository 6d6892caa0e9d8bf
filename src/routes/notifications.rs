// ============================================================================
// Notification Routes
// ============================================================================
//
// Endpoints:
// - POST /send - Publish a notification (form fields: fromID, toID, message)
//
// ============================================================================

use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Form, Json,
};
use serde_json::json;
use std::sync::Arc;

use crate::context::AppContext;
use crate::error::{AppError, AppResult};
use crate::metrics;
use crate::models::UserId;

/// Raw form fields. Ids stay strings so a bad value is reported with the
/// parser's own error text instead of a generic rejection.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SendNotificationForm {
    pub from_id: String,
    pub to_id: String,
    pub message: String,
}

impl SendNotificationForm {
    /// Collect fields from decoded form pairs. When a field repeats, the
    /// first value is used; absent fields are empty.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut from_id = None;
        let mut to_id = None;
        let mut message = None;

        for (name, value) in pairs {
            let slot = match name.as_str() {
                "fromID" => &mut from_id,
                "toID" => &mut to_id,
                "message" => &mut message,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }

        Self {
            from_id: from_id.unwrap_or_default(),
            to_id: to_id.unwrap_or_default(),
            message: message.unwrap_or_default(),
        }
    }
}

/// POST /send
pub async fn send_notification(
    State(app_context): State<Arc<AppContext>>,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> AppResult<impl IntoResponse> {
    let Form(pairs) = form.map_err(|rejection| AppError::invalid_input(rejection.body_text()))?;
    let form = SendNotificationForm::from_pairs(pairs);

    let from_id = parse_id("fromID", &form.from_id)?;
    let to_id = parse_id("toID", &form.to_id)?;

    app_context
        .publisher
        .publish(from_id, to_id, form.message)
        .await?;

    metrics::record_outcome("ok");
    Ok((
        StatusCode::OK,
        Json(json!({"message": "Notification sent successfully!"})),
    ))
}

fn parse_id(field: &str, value: &str) -> AppResult<UserId> {
    value.parse().map_err(|e| {
        AppError::invalid_input(format!(
            "failed to parse ID from form value {field}: {e}"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_accepts_signed_integers() {
        assert_eq!(parse_id("fromID", "42").unwrap(), 42);
        assert_eq!(parse_id("fromID", "-3").unwrap(), -3);
        assert_eq!(parse_id("fromID", "+3").unwrap(), 3);
    }

    #[test]
    fn test_parse_id_error_names_the_field() {
        let err = parse_id("toID", "abc").unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.user_message(),
            "failed to parse ID from form value toID: invalid digit found in string"
        );
    }

    #[test]
    fn test_missing_id_is_a_parse_error() {
        let err = parse_id("fromID", "").unwrap_err();
        assert_eq!(
            err.user_message(),
            "failed to parse ID from form value fromID: cannot parse integer from empty string"
        );
    }

    fn pairs(fields: &[(&str, &str)]) -> Vec<(String, String)> {
        fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_repeated_field_keeps_first_value() {
        let form = SendNotificationForm::from_pairs(pairs(&[
            ("fromID", "1"),
            ("toID", "2"),
            ("toID", "1"),
            ("message", "hi"),
            ("message", "bye"),
        ]));
        assert_eq!(
            form,
            SendNotificationForm {
                from_id: "1".to_string(),
                to_id: "2".to_string(),
                message: "hi".to_string(),
            }
        );
    }

    #[test]
    fn test_absent_and_unknown_fields() {
        let form = SendNotificationForm::from_pairs(pairs(&[("extra", "x"), ("toID", "3")]));
        assert_eq!(form.from_id, "");
        assert_eq!(form.to_id, "3");
        assert_eq!(form.message, "");
    }

    #[test]
    fn test_whitespace_is_not_trimmed() {
        assert!(parse_id("fromID", " 1").is_err());
    }
}

use serde_json::Value as JsonValue;

use crate::error::ValidationError;

/// The payload keys a bookmark may carry, in the order create validation
/// reports them.
pub const BOOKMARK_FIELDS: [&str; 4] = ["title", "url", "description", "rating"];

/// Create payloads must carry every bookmark field, present and non-null. An
/// explicit empty-string description counts as present.
pub fn validate_create(body: &JsonValue) -> Result<(), ValidationError> {
    for field in BOOKMARK_FIELDS {
        match body.get(field) {
            Some(value) if !value.is_null() => {}
            _ => return Err(ValidationError::MissingField(field)),
        }
    }
    Ok(())
}

/// Update payloads must carry at least one truthy bookmark field. Keys
/// outside the bookmark fields are ignored and never persisted.
pub fn validate_update(body: &JsonValue) -> Result<(), ValidationError> {
    let has_change = BOOKMARK_FIELDS
        .iter()
        .any(|field| body.get(field).is_some_and(is_truthy));

    if has_change {
        Ok(())
    } else {
        Err(ValidationError::EmptyUpdate)
    }
}

fn is_truthy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => n.as_f64().is_none_or(|f| f != 0.0),
        JsonValue::String(s) => !s.is_empty(),
        JsonValue::Array(_) | JsonValue::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_accepts_complete_payload() {
        let body = json!({
            "title": "Google",
            "url": "www.google.com",
            "description": "Popular search engine",
            "rating": 3,
        });
        assert_eq!(validate_create(&body), Ok(()));
    }

    #[test]
    fn create_reports_missing_fields_in_order() {
        assert_eq!(
            validate_create(&json!({})),
            Err(ValidationError::MissingField("title"))
        );
        assert_eq!(
            validate_create(&json!({ "title": "Google" })),
            Err(ValidationError::MissingField("url"))
        );
        assert_eq!(
            validate_create(&json!({ "title": "Google", "url": "www.google.com" })),
            Err(ValidationError::MissingField("description"))
        );
        assert_eq!(
            validate_create(&json!({
                "title": "Google",
                "url": "www.google.com",
                "description": "Popular search engine",
            })),
            Err(ValidationError::MissingField("rating"))
        );
    }

    #[test]
    fn create_treats_null_as_missing() {
        let body = json!({
            "title": "Google",
            "url": null,
            "description": "",
            "rating": 3,
        });
        assert_eq!(
            validate_create(&body),
            Err(ValidationError::MissingField("url"))
        );
    }

    #[test]
    fn create_accepts_empty_description() {
        let body = json!({
            "title": "Google",
            "url": "www.google.com",
            "description": "",
            "rating": 3,
        });
        assert_eq!(validate_create(&body), Ok(()));
    }

    #[test]
    fn update_requires_one_truthy_field() {
        assert_eq!(validate_update(&json!({})), Err(ValidationError::EmptyUpdate));
        assert_eq!(
            validate_update(&json!({ "title": "", "rating": 0 })),
            Err(ValidationError::EmptyUpdate)
        );
        assert_eq!(validate_update(&json!({ "rating": 5 })), Ok(()));
    }

    #[test]
    fn update_ignores_unknown_keys() {
        assert_eq!(
            validate_update(&json!({ "owner": "someone" })),
            Err(ValidationError::EmptyUpdate)
        );
    }

    #[test]
    fn missing_field_message_names_the_field() {
        assert_eq!(
            ValidationError::MissingField("title").to_string(),
            "Missing 'title' in request body"
        );
    }
}

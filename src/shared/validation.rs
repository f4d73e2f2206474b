use validator::Validate;

use crate::core::error::{AppError, Result};

/// Presence check for request DTOs.
///
/// DTOs mark required fields with `required` + `length(min = 1)`; any failure
/// is reported as a single validation error listing the offending fields by
/// their wire (camelCase) names.
pub fn validate_required<T: Validate>(dto: &T) -> Result<()> {
    let Err(errors) = dto.validate() else {
        return Ok(());
    };

    let mut fields: Vec<String> = errors
        .field_errors()
        .keys()
        .map(|field| to_camel_case(field))
        .collect();
    fields.sort();

    Err(AppError::Validation(format!(
        "Missing required fields: {}",
        fields.join(", ")
    )))
}

/// Optional text inputs arrive as empty strings from HTML forms; store those as NULL.
pub fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for ch in field.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Validate)]
    struct Sample {
        #[validate(required, length(min = 1))]
        name: Option<String>,
        #[validate(required, length(min = 1))]
        category_id: Option<String>,
    }

    #[test]
    fn test_present_fields_pass() {
        let sample = Sample {
            name: Some("GitHub".to_string()),
            category_id: Some("abc".to_string()),
        };
        assert!(validate_required(&sample).is_ok());
    }

    #[test]
    fn test_missing_and_empty_fields_are_reported() {
        let sample = Sample {
            name: Some(String::new()),
            category_id: None,
        };

        match validate_required(&sample) {
            Err(AppError::Validation(msg)) => {
                assert_eq!(msg, "Missing required fields: categoryId, name");
            }
            other => panic!("expected validation error, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_blank_to_none() {
        assert_eq!(blank_to_none(None), None);
        assert_eq!(blank_to_none(Some("".to_string())), None);
        assert_eq!(blank_to_none(Some("   ".to_string())), None);
        assert_eq!(
            blank_to_none(Some("https://x.test/icon.png".to_string())),
            Some("https://x.test/icon.png".to_string())
        );
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("category_id"), "categoryId");
        assert_eq!(to_camel_case("detailed_description"), "detailedDescription");
        assert_eq!(to_camel_case("name"), "name");
    }
}

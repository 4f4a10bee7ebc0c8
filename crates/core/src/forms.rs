//! Submitted form types and their validation.
//!
//! Handlers deserialize `application/x-www-form-urlencoded` bodies into these
//! types, then call [`validate_form`] (or a type-specific `validated` method)
//! before anything is persisted. Fields that a form does not declare are
//! ignored by deserialization, so a client cannot smuggle an owner id or a
//! foreign key into a submission.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::CoreError;
use crate::meal::Meal;

/// Accepted date input formats, tried in order.
pub const DATE_INPUT_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y"];

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.@+-]+$").expect("username pattern is valid"));

/// Run derived validation and flatten failures into a [`CoreError::Validation`].
pub fn validate_form<T: Validate>(form: &T) -> Result<(), CoreError> {
    form.validate()
        .map_err(|errors| CoreError::Validation(errors.to_string()))
}

// ---------------------------------------------------------------------------
// Cats
// ---------------------------------------------------------------------------

/// Fields accepted when creating a cat. The owner is never part of the form.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CatForm {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub breed: String,
    #[validate(length(min = 1, max = 250))]
    pub description: String,
    pub age: i32,
}

/// Fields accepted when editing a cat. The name is fixed after creation.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CatUpdateForm {
    #[validate(length(min = 1, max = 100))]
    pub breed: String,
    #[validate(length(min = 1, max = 250))]
    pub description: String,
    pub age: i32,
}

// ---------------------------------------------------------------------------
// Toys
// ---------------------------------------------------------------------------

/// Fields accepted when creating or editing a toy.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct ToyForm {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(length(min = 1, max = 20))]
    pub color: String,
}

// ---------------------------------------------------------------------------
// Feedings
// ---------------------------------------------------------------------------

/// Raw feeding submission. The cat comes from the request path.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedingForm {
    pub date: String,
    /// Meal code; breakfast when omitted.
    #[serde(default)]
    pub meal: Option<String>,
}

/// A feeding submission that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidFeeding {
    pub date: NaiveDate,
    pub meal: Meal,
}

impl FeedingForm {
    /// Parse the date and meal code.
    pub fn validated(&self) -> Result<ValidFeeding, CoreError> {
        let date = parse_date(&self.date)?;
        let meal = match self.meal.as_deref() {
            None => Meal::default(),
            Some(code) => Meal::from_code(code.trim())?,
        };
        Ok(ValidFeeding { date, meal })
    }
}

/// Parse a calendar date in any of [`DATE_INPUT_FORMATS`].
///
/// Slash-separated input picks the two- or four-digit year format from the
/// width of the last component.
pub fn parse_date(raw: &str) -> Result<NaiveDate, CoreError> {
    let trimmed = raw.trim();
    let invalid = || CoreError::Validation(format!("Enter a valid date (got '{trimmed}')"));

    if trimmed.contains('/') {
        let format = match trimmed.rsplit('/').next().map(str::len) {
            Some(4) => DATE_INPUT_FORMATS[1],
            Some(2) => DATE_INPUT_FORMATS[2],
            _ => return Err(invalid()),
        };
        return NaiveDate::parse_from_str(trimmed, format).map_err(|_| invalid());
    }

    NaiveDate::parse_from_str(trimmed, DATE_INPUT_FORMATS[0]).map_err(|_| invalid())
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

fn validate_username_chars(username: &str) -> Result<(), ValidationError> {
    if USERNAME_RE.is_match(username) {
        Ok(())
    } else {
        Err(ValidationError::new("username_chars"))
    }
}

/// Registration form: a username and the password entered twice.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignupForm {
    #[validate(
        length(min = 1, max = 150),
        custom(function = "validate_username_chars")
    )]
    #[serde(default)]
    pub username: String,
    #[validate(length(min = 8))]
    #[serde(default)]
    pub password1: String,
    #[serde(default)]
    pub password2: String,
}

impl SignupForm {
    /// Validate field rules plus the cross-field password checks.
    pub fn validated(&self) -> Result<(), CoreError> {
        validate_form(self)?;

        if self.password1 != self.password2 {
            return Err(CoreError::Validation(
                "The two password fields didn't match".into(),
            ));
        }
        if self.password1.chars().all(|c| c.is_ascii_digit()) {
            return Err(CoreError::Validation(
                "This password is entirely numeric".into(),
            ));
        }
        if self.password1.eq_ignore_ascii_case(&self.username) {
            return Err(CoreError::Validation(
                "The password is too similar to the username".into(),
            ));
        }
        Ok(())
    }
}

/// Login form. `next` carries the page the gate bounced the user from.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub next: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(username: &str, p1: &str, p2: &str) -> SignupForm {
        SignupForm {
            username: username.into(),
            password1: p1.into(),
            password2: p2.into(),
        }
    }

    #[test]
    fn cat_form_limits() {
        let ok = CatForm {
            name: "Franklin".into(),
            breed: "Tabby".into(),
            description: "x".repeat(250),
            age: 3,
        };
        assert!(validate_form(&ok).is_ok());

        let long = CatForm {
            description: "x".repeat(251),
            ..ok.clone()
        };
        assert!(validate_form(&long).is_err());

        let undescribed = CatForm {
            description: String::new(),
            ..ok.clone()
        };
        assert!(validate_form(&undescribed).is_err());

        let unnamed = CatForm {
            name: String::new(),
            ..ok
        };
        assert!(validate_form(&unnamed).is_err());
    }

    #[test]
    fn cat_update_form_requires_description() {
        let ok = CatUpdateForm {
            breed: "Tabby".into(),
            description: "Naps a lot".into(),
            age: 4,
        };
        assert!(validate_form(&ok).is_ok());

        let blank = CatUpdateForm {
            description: String::new(),
            ..ok
        };
        assert!(validate_form(&blank).is_err());
    }

    #[test]
    fn toy_form_limits() {
        let ok = ToyForm {
            name: "Mouse".into(),
            color: "Grey".into(),
        };
        assert!(validate_form(&ok).is_ok());

        let long_color = ToyForm {
            color: "c".repeat(21),
            ..ok
        };
        assert!(validate_form(&long_color).is_err());
    }

    #[test]
    fn cat_form_ignores_owner_fields() {
        let form: CatForm = serde_json::from_value(serde_json::json!({
            "name": "Franklin",
            "breed": "Tabby",
            "description": "",
            "age": 3,
            "user_id": 999,
        }))
        .unwrap();
        assert_eq!(form.name, "Franklin");
    }

    #[test]
    fn parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(parse_date("2024-01-01").unwrap(), expected);
        assert_eq!(parse_date("01/01/2024").unwrap(), expected);
        assert_eq!(parse_date("01/01/24").unwrap(), expected);
        assert_eq!(parse_date(" 2024-01-01 ").unwrap(), expected);
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert!(parse_date("").is_err());
        assert!(parse_date("yesterday").is_err());
        assert!(parse_date("2024-13-01").is_err());
        assert!(parse_date("1/1/202").is_err());
    }

    #[test]
    fn feeding_defaults_to_breakfast() {
        let form = FeedingForm {
            date: "2024-01-01".into(),
            meal: None,
        };
        assert_eq!(form.validated().unwrap().meal, Meal::Breakfast);
    }

    #[test]
    fn feeding_rejects_unknown_meal() {
        let form = FeedingForm {
            date: "2024-01-01".into(),
            meal: Some("S".into()),
        };
        assert!(form.validated().is_err());
    }

    #[test]
    fn signup_accepts_valid_form() {
        assert!(signup("sylvia", "whiskers-42", "whiskers-42").validated().is_ok());
        assert!(signup("a.b@c+d-e_f", "whiskers-42", "whiskers-42").validated().is_ok());
    }

    #[test]
    fn signup_rejects_bad_forms() {
        assert!(signup("", "whiskers-42", "whiskers-42").validated().is_err());
        assert!(signup("has space", "whiskers-42", "whiskers-42").validated().is_err());
        assert!(signup("sylvia", "whiskers-42", "whiskers-43").validated().is_err());
        assert!(signup("sylvia", "short", "short").validated().is_err());
        assert!(signup("sylvia", "12345678", "12345678").validated().is_err());
        assert!(signup("sylvia123", "SYLVIA123", "SYLVIA123").validated().is_err());
        assert!(signup(&"u".repeat(151), "whiskers-42", "whiskers-42")
            .validated()
            .is_err());
    }
}

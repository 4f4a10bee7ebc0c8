//! Meal choices for feeding records.
//!
//! Meals are persisted as a single-letter code (`B`, `L`, `D`) and displayed
//! with their long label. Breakfast is the default when no meal is submitted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// One of the three meals a feeding can record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Meal {
    #[default]
    #[serde(rename = "B")]
    Breakfast,
    #[serde(rename = "L")]
    Lunch,
    #[serde(rename = "D")]
    Dinner,
}

impl Meal {
    /// All meals in display order.
    pub const ALL: [Meal; 3] = [Meal::Breakfast, Meal::Lunch, Meal::Dinner];

    /// Single-letter code stored in the `feedings.meal` column.
    pub fn code(self) -> &'static str {
        match self {
            Self::Breakfast => "B",
            Self::Lunch => "L",
            Self::Dinner => "D",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Breakfast => "Breakfast",
            Self::Lunch => "Lunch",
            Self::Dinner => "Dinner",
        }
    }

    /// Parse a stored or submitted meal code.
    pub fn from_code(code: &str) -> Result<Self, CoreError> {
        match code {
            "B" => Ok(Self::Breakfast),
            "L" => Ok(Self::Lunch),
            "D" => Ok(Self::Dinner),
            other => Err(CoreError::Validation(format!(
                "Invalid meal '{other}'. Must be one of: B, L, D"
            ))),
        }
    }
}

impl fmt::Display for Meal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Meal {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
    }
}

impl TryFrom<String> for Meal {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_code(&value)
    }
}

/// A `(code, label)` pair used to describe the meal select input.
#[derive(Debug, Clone, Serialize)]
pub struct MealChoice {
    pub code: &'static str,
    pub label: &'static str,
}

/// The meal choices in display order.
pub fn meal_choices() -> Vec<MealChoice> {
    Meal::ALL
        .iter()
        .map(|m| MealChoice {
            code: m.code(),
            label: m.label(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for meal in Meal::ALL {
            assert_eq!(Meal::from_code(meal.code()).unwrap(), meal);
        }
    }

    #[test]
    fn unknown_code_is_rejected() {
        assert!(Meal::from_code("X").is_err());
        assert!(Meal::from_code("").is_err());
        assert!(Meal::from_code("b").is_err());
    }

    #[test]
    fn default_is_breakfast() {
        assert_eq!(Meal::default(), Meal::Breakfast);
    }

    #[test]
    fn serializes_as_code() {
        assert_eq!(serde_json::to_value(Meal::Dinner).unwrap(), "D");
        let parsed: Meal = serde_json::from_value(serde_json::json!("L")).unwrap();
        assert_eq!(parsed, Meal::Lunch);
    }

    #[test]
    fn displays_label() {
        assert_eq!(Meal::Lunch.to_string(), "Lunch");
    }
}

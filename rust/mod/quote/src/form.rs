//! Raw form input and its parsing into a [`QuoteRequest`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::QuoteRequest;

#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("{field} must be {expected}, got {value:?}")]
    Invalid {
        field: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// The five form fields as the user typed them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuoteForm {
    pub name: String,
    pub age: String,
    pub city: String,
    pub income: String,
    pub dependents: String,
}

impl QuoteForm {
    /// Validate every field. All fields are required.
    pub fn parse(&self) -> Result<QuoteRequest, FormError> {
        Ok(QuoteRequest {
            name: required_text("name", &self.name)?,
            age: parse_age(&self.age)?,
            city: required_text("city", &self.city)?,
            income: parse_income(&self.income)?,
            dependents: parse_dependents(&self.dependents)?,
        })
    }
}

fn required_text(field: &'static str, raw: &str) -> Result<String, FormError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(FormError::Required(field));
    }
    Ok(value.to_string())
}

fn required_number<'a>(field: &'static str, raw: &'a str) -> Result<&'a str, FormError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(FormError::Required(field));
    }
    Ok(value)
}

fn parse_age(raw: &str) -> Result<u32, FormError> {
    let value = required_number("age", raw)?;
    value.parse().map_err(|_| FormError::Invalid {
        field: "age",
        expected: "a non-negative whole number",
        value: value.to_string(),
    })
}

pub fn parse_income(raw: &str) -> Result<f64, FormError> {
    let value = required_number("income", raw)?;
    match value.parse::<f64>() {
        Ok(income) if income.is_finite() && income >= 0.0 => Ok(income),
        _ => Err(FormError::Invalid {
            field: "income",
            expected: "a non-negative number",
            value: value.to_string(),
        }),
    }
}

/// Whole numbers parse directly; a fractional count is truncated toward zero.
pub fn parse_dependents(raw: &str) -> Result<u32, FormError> {
    let value = required_number("dependents", raw)?;
    if let Ok(count) = value.parse::<u32>() {
        return Ok(count);
    }
    match value.parse::<f64>() {
        Ok(count) if count.is_finite() && count >= 0.0 && count < f64::from(u32::MAX) => {
            Ok(count.trunc() as u32)
        }
        _ => Err(FormError::Invalid {
            field: "dependents",
            expected: "a non-negative number",
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, age: &str, city: &str, income: &str, dependents: &str) -> QuoteForm {
        QuoteForm {
            name: name.into(),
            age: age.into(),
            city: city.into(),
            income: income.into(),
            dependents: dependents.into(),
        }
    }

    #[test]
    fn parse_valid_form() {
        let req = form(" Asha ", "34", "Pune", "500000", "2").parse().unwrap();
        assert_eq!(
            req,
            QuoteRequest {
                name: "Asha".into(),
                age: 34,
                city: "Pune".into(),
                income: 500_000.0,
                dependents: 2,
            }
        );
    }

    #[test]
    fn required_fields() {
        assert_eq!(form("", "34", "Pune", "1", "0").parse(), Err(FormError::Required("name")));
        assert_eq!(form("A", "34", "  ", "1", "0").parse(), Err(FormError::Required("city")));
        assert_eq!(form("A", "", "Pune", "1", "0").parse(), Err(FormError::Required("age")));
        assert_eq!(form("A", "34", "Pune", "", "0").parse(), Err(FormError::Required("income")));
        assert_eq!(form("A", "34", "Pune", "1", "").parse(), Err(FormError::Required("dependents")));
    }

    #[test]
    fn invalid_numbers() {
        assert!(matches!(
            form("A", "-1", "Pune", "1", "0").parse(),
            Err(FormError::Invalid { field: "age", .. })
        ));
        assert!(matches!(
            form("A", "30", "Pune", "abc", "0").parse(),
            Err(FormError::Invalid { field: "income", .. })
        ));
        assert!(matches!(
            form("A", "30", "Pune", "-5", "0").parse(),
            Err(FormError::Invalid { field: "income", .. })
        ));
        assert!(matches!(
            form("A", "30", "Pune", "inf", "0").parse(),
            Err(FormError::Invalid { field: "income", .. })
        ));
        assert!(matches!(
            form("A", "30", "Pune", "1", "-2").parse(),
            Err(FormError::Invalid { field: "dependents", .. })
        ));
    }

    #[test]
    fn required_number_borrows_the_trimmed_input() {
        let raw = String::from("  42 ");
        assert_eq!(required_number("age", &raw), Ok("42"));
        assert_eq!(required_number("age", " \t"), Err(FormError::Required("age")));
    }

    #[test]
    fn fractional_dependents_truncate() {
        let req = form("A", "30", "Pune", "1000.5", "2.9").parse().unwrap();
        assert_eq!(req.dependents, 2);
        assert_eq!(req.income, 1000.5);
    }

    #[test]
    fn error_messages_name_the_field() {
        let err = form("A", "x", "Pune", "1", "0").parse().unwrap_err();
        assert_eq!(err.to_string(), "age must be a non-negative whole number, got \"x\"");
    }
}

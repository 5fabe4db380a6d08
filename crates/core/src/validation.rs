//! Form validation support

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// A validation failure on a single field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// All validation failures of a form, in field order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    /// Record the outcome of a single-field check
    pub fn check(&mut self, field: &str, result: Result<(), String>) {
        if let Err(message) = result {
            self.add(field, message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Messages reported for `field`
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.errors
            .iter()
            .filter(move |e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// `Ok(())` when nothing was recorded
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one field failed
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Types that can check their own fields
pub trait Validate {
    /// Validate every field, collecting all failures
    ///
    /// # Errors
    ///
    /// Returns the collected field errors when any check fails
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// Common validation helpers
pub mod validators {
    use super::{LazyLock, Regex};

    static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^[A-Za-z0-9._%+'-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")
            .unwrap_or_else(|e| panic!("invalid email pattern: {e}"))
    });

    pub const INVALID_EMAIL: &str = "Digite um email válido";

    /// Validate an email address
    pub fn validate_email(value: &str) -> Result<(), String> {
        if EMAIL_RE.is_match(value) {
            Ok(())
        } else {
            Err(INVALID_EMAIL.to_string())
        }
    }

    /// Validate that `value` has at least `min` characters
    pub fn validate_min_chars(value: &str, min: usize, message: &str) -> Result<(), String> {
        if value.chars().count() >= min {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }

    /// Validate that a trimmed value is not empty
    pub fn validate_required(value: &str, message: &str) -> Result<(), String> {
        if value.trim().is_empty() {
            Err(message.to_string())
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::validators::*;
    use super::*;

    #[test]
    fn email_validation() {
        assert!(validate_email("ana@glowapp.com.br").is_ok());
        assert!(validate_email("ana.souza+salao@gmail.com").is_ok());
        assert!(validate_email("ana@").is_err());
        assert!(validate_email("ana glow@x.com").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn min_chars_counts_characters_not_bytes() {
        assert!(validate_min_chars("çãoçãé", 6, "curta").is_ok());
        assert_eq!(validate_min_chars("abc", 6, "curta"), Err("curta".to_string()));
    }

    #[test]
    fn errors_collect_and_display() {
        let mut errors = ValidationErrors::new();
        errors.check("email", validate_email("x"));
        errors.check("password", Ok(()));
        errors.add("password", "Senha deve ter pelo menos 6 caracteres");

        assert_eq!(errors.errors.len(), 2);
        assert_eq!(
            errors.for_field("email").collect::<Vec<_>>(),
            vec![INVALID_EMAIL]
        );
        assert_eq!(
            errors.to_string(),
            "email: Digite um email válido; password: Senha deve ter pelo menos 6 caracteres"
        );
        assert!(errors.into_result().is_err());
        assert!(ValidationErrors::new().into_result().is_ok());
    }
}

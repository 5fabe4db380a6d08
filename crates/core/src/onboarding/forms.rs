//! Authentication forms

use crate::validation::validators::{validate_email, validate_min_chars};
use crate::validation::{Validate, ValidationErrors};
use serde::{Deserialize, Serialize};

pub const MIN_PASSWORD_CHARS: usize = 6;
pub const OTP_LENGTH: usize = 6;

const SHORT_PASSWORD: &str = "Senha deve ter pelo menos 6 caracteres";
const SHORT_CONFIRMATION: &str = "Confirmar senha deve ter pelo menos 6 caracteres";
const PASSWORD_MISMATCH: &str = "As senhas não coincidem";
const INVALID_OTP: &str = "O código deve ter 6 dígitos";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

impl Validate for SignInForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check("email", validate_email(&self.email));
        errors.check(
            "password",
            validate_min_chars(&self.password, MIN_PASSWORD_CHARS, SHORT_PASSWORD),
        );
        errors.into_result()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl Validate for SignUpForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check("email", validate_email(&self.email));
        errors.check(
            "password",
            validate_min_chars(&self.password, MIN_PASSWORD_CHARS, SHORT_PASSWORD),
        );
        errors.check(
            "confirmPassword",
            validate_min_chars(&self.confirm_password, MIN_PASSWORD_CHARS, SHORT_CONFIRMATION),
        );
        if self.password != self.confirm_password {
            errors.add("confirmPassword", PASSWORD_MISMATCH);
        }
        errors.into_result()
    }
}

/// One-time code sent to the email address given at sign-up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

impl Validate for VerifyOtpRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check("email", validate_email(&self.email));
        if self.otp.len() != OTP_LENGTH || !self.otp.bytes().all(|b| b.is_ascii_digit()) {
            errors.add("otp", INVALID_OTP);
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sign_up(password: &str, confirm: &str) -> SignUpForm {
        SignUpForm {
            email: "ana@glowapp.com.br".to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn sign_in_reports_every_failing_field() {
        let form = SignInForm {
            email: "ana".to_string(),
            password: "123".to_string(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.errors.len(), 2);
        assert_eq!(errors.for_field("password").next(), Some(SHORT_PASSWORD));
    }

    #[test]
    fn sign_up_mismatch_is_reported_on_confirmation() {
        assert!(sign_up("segredo1", "segredo1").validate().is_ok());

        let errors = sign_up("segredo1", "segredo2").validate().unwrap_err();
        assert_eq!(
            errors.for_field("confirmPassword").collect::<Vec<_>>(),
            vec![PASSWORD_MISMATCH]
        );
    }

    #[test]
    fn sign_up_serializes_camel_case() {
        let value = serde_json::to_value(sign_up("segredo1", "segredo1")).unwrap();
        assert_eq!(
            value,
            json!({
                "email": "ana@glowapp.com.br",
                "password": "segredo1",
                "confirmPassword": "segredo1"
            })
        );
    }

    #[test]
    fn otp_must_be_six_digits() {
        let mut request = VerifyOtpRequest {
            email: "ana@glowapp.com.br".to_string(),
            otp: "123456".to_string(),
        };
        assert!(request.validate().is_ok());

        for bad in ["12345", "1234567", "12a456", "١٢٣٤٥٦"] {
            request.otp = bad.to_string();
            assert!(request.validate().is_err(), "{bad} should be rejected");
        }
    }
}

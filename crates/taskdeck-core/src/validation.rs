//! Form validation rules shared by the create/edit operations and the
//! account forms (login, signup, profile, password reset).
//!
//! Rules only collect messages into a [`ValidationErrors`]; callers decide
//! whether to abort.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ValidationErrors;

/// Record `message` when `value` is blank.
pub fn require(errors: &mut ValidationErrors, field: &'static str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.add(field, message);
    }
}

/// Record `message` when `value` has fewer than `min` characters.
pub fn min_chars(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &str,
    min: usize,
    message: &str,
) {
    if value.chars().count() < min {
        errors.add(field, message);
    }
}

/// One `@`, a non-empty local part and a dotted domain with no empty
/// labels. Whitespace is rejected anywhere.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").expect("email pattern is valid")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Record an email format error.
pub fn email(errors: &mut ValidationErrors, field: &'static str, value: &str, message: &str) {
    if !is_valid_email(value) {
        errors.add(field, message);
    }
}

/// Login form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

impl LoginForm {
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        email(&mut errors, "email", &self.email, "Please enter a valid email address");
        min_chars(
            &mut errors,
            "password",
            &self.password,
            6,
            "Password must be at least 6 characters",
        );
        errors
    }
}

/// Signup form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub accept_terms: bool,
}

impl SignupForm {
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        min_chars(&mut errors, "name", &self.name, 2, "Name must be at least 2 characters");
        email(&mut errors, "email", &self.email, "Please enter a valid email address");
        min_chars(
            &mut errors,
            "password",
            &self.password,
            8,
            "Password must be at least 8 characters",
        );
        if self.password != self.confirm_password {
            errors.add("confirm_password", "Passwords don't match");
        }
        if !self.accept_terms {
            errors.add("accept_terms", "You must accept the terms and conditions");
        }
        errors
    }
}

/// Password reset request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForgotPasswordForm {
    pub email: String,
}

impl ForgotPasswordForm {
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        email(&mut errors, "email", &self.email, "Please enter a valid email address");
        errors
    }
}

/// Profile section of the settings page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
    pub confirm_password: Option<String>,
}

impl ProfileForm {
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        min_chars(&mut errors, "name", &self.name, 2, "Name must be at least 2 characters");
        email(&mut errors, "email", &self.email, "Please enter a valid email address");

        // Only checked when a new password was actually typed.
        if let Some(new_password) = self.new_password.as_deref().filter(|p| !p.is_empty()) {
            if Some(new_password) != self.confirm_password.as_deref() {
                errors.add("confirm_password", "Passwords don't match");
            }
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_format() {
        assert!(is_valid_email("sarah.chen@example.com"));
        assert!(!is_valid_email("sarah.chen@example"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("sarah chen@example.com"));
        assert!(!is_valid_email("a@b@example.com"));
        assert!(!is_valid_email("a@example..com"));
    }

    #[test]
    fn test_email_pattern_edges() {
        assert!(is_valid_email("émile@exemple.fr"));
        assert!(is_valid_email("ops+alerts@mail.example.co.uk"));
        assert!(!is_valid_email("sarah@.example.com"));
        assert!(!is_valid_email("sarah@example.com."));
        assert!(!is_valid_email("sarah@example.com\n"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_forgot_password_requires_valid_email() {
        let form = ForgotPasswordForm { email: "sarah.chen".into() };
        assert_eq!(
            form.validate().message_for("email"),
            Some("Please enter a valid email address")
        );
        let form = ForgotPasswordForm { email: "sarah.chen@example.com".into() };
        assert!(form.validate().is_empty());
    }

    #[test]
    fn test_min_chars_counts_characters_not_bytes() {
        let mut errors = ValidationErrors::new();
        min_chars(&mut errors, "description", "ééééé", 5, "too short");
        assert!(errors.is_empty());
    }

    #[test]
    fn test_require_treats_whitespace_as_blank() {
        let mut errors = ValidationErrors::new();
        require(&mut errors, "title", "   ", "Task title is required");
        assert_eq!(errors.message_for("title"), Some("Task title is required"));
    }

    #[test]
    fn test_profile_password_mismatch() {
        let form = ProfileForm {
            name: "Sarah Chen".into(),
            email: "sarah.chen@example.com".into(),
            new_password: Some("hunter22".into()),
            confirm_password: Some("hunter23".into()),
            ..Default::default()
        };
        let errors = form.validate();
        assert_eq!(errors.message_for("confirm_password"), Some("Passwords don't match"));
    }

    #[test]
    fn test_profile_without_new_password_skips_match() {
        let form = ProfileForm {
            name: "Sarah Chen".into(),
            email: "sarah.chen@example.com".into(),
            new_password: Some(String::new()),
            ..Default::default()
        };
        assert!(form.validate().is_empty());
    }

    #[test]
    fn test_signup_requires_terms_and_long_password() {
        let form = SignupForm {
            name: "Mike".into(),
            email: "mike@example.com".into(),
            password: "short".into(),
            confirm_password: "short".into(),
            accept_terms: false,
        };
        let errors = form.validate();
        assert!(errors.message_for("password").is_some());
        assert!(errors.message_for("accept_terms").is_some());
        assert!(errors.message_for("confirm_password").is_none());
    }

    #[test]
    fn test_login_form() {
        let ok = LoginForm {
            email: "emma.davis@example.com".into(),
            password: "secret".into(),
            remember_me: true,
        };
        assert!(ok.validate().is_empty());

        let bad = LoginForm {
            email: "emma".into(),
            password: "123".into(),
            remember_me: false,
        };
        assert_eq!(bad.validate().fields.len(), 2);
    }
}

//! Account forms: login, signup, profile and password reset.
//!
//! Nothing is stored or authenticated. Each form is validated, held for the
//! configured submit latency and acknowledged with a toast.

use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{Input, Password};
use tracing::info;

use taskdeck_core::notifier::{Notification, NotificationKind};
use taskdeck_core::validation::{ForgotPasswordForm, LoginForm, ProfileForm, SignupForm};
use taskdeck_core::CoreError;

use crate::output;
use crate::session::Session;

#[derive(Subcommand)]
pub enum AccountCommands {
    /// Sign in with email and password
    Login(LoginArgs),

    /// Create an account
    Signup(SignupArgs),

    /// Update profile name and email, optionally changing the password
    Profile(ProfileArgs),

    /// Request password reset instructions
    ForgotPassword {
        /// Account email
        #[arg(long)]
        email: Option<String>,
    },
}

#[derive(Args)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: Option<String>,

    /// Keep the session signed in
    #[arg(long)]
    pub remember_me: bool,
}

#[derive(Args)]
pub struct SignupArgs {
    /// Full name
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    /// Accept the terms and conditions
    #[arg(long)]
    pub accept_terms: bool,
}

#[derive(Args)]
pub struct ProfileArgs {
    /// Display name
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    /// Prompt for current, new and confirmed password
    #[arg(long)]
    pub change_password: bool,
}

/// A filled-in account form.
#[derive(Debug, Clone)]
pub enum AccountForm {
    Login(LoginForm),
    Signup(SignupForm),
    Profile(ProfileForm),
    ForgotPassword(ForgotPasswordForm),
}

impl AccountForm {
    fn name(&self) -> &'static str {
        match self {
            Self::Login(_) => "login",
            Self::Signup(_) => "signup",
            Self::Profile(_) => "profile",
            Self::ForgotPassword(_) => "forgot_password",
        }
    }

    fn spinner_message(&self) -> &'static str {
        match self {
            Self::Login(_) => "Signing in...",
            Self::Signup(_) => "Creating account...",
            Self::Profile(_) => "Saving settings...",
            Self::ForgotPassword(_) => "Sending reset email...",
        }
    }

    /// Field errors, as a `CoreError::Validation` when there are any.
    pub fn check(&self) -> Result<(), CoreError> {
        let errors = match self {
            Self::Login(form) => form.validate(),
            Self::Signup(form) => form.validate(),
            Self::Profile(form) => form.validate(),
            Self::ForgotPassword(form) => form.validate(),
        };
        errors.into_result()
    }

    /// Toast shown once the form went through.
    pub fn acknowledgement(&self, now: chrono::DateTime<chrono::Utc>) -> Notification {
        let (title, description) = match self {
            Self::Login(_) => ("Login Successful", "Redirecting to dashboard...".to_string()),
            Self::Signup(_) => (
                "Account Created",
                "Your account has been created successfully! Redirecting to login...".to_string(),
            ),
            Self::Profile(_) => (
                "Settings Updated",
                "Your profile settings have been saved successfully.".to_string(),
            ),
            Self::ForgotPassword(form) => (
                "Reset Email Sent",
                format!("Check {} for password reset instructions.", form.email),
            ),
        };
        Notification::new(NotificationKind::Success, title, description, now)
    }
}

pub async fn execute(cmd: AccountCommands, session: &mut Session) -> Result<()> {
    let form = collect_form(cmd)?;
    let acknowledgement = submit(&form, session).await?;
    output::print_toast(&acknowledgement);
    Ok(())
}

/// Validate, then wait out the simulated round trip.
pub async fn submit(form: &AccountForm, session: &Session) -> Result<Notification> {
    form.check()?;
    session.simulate(form.spinner_message()).await;
    info!(form = form.name(), "Account form submitted");
    Ok(form.acknowledgement(session.store().now()))
}

fn collect_form(cmd: AccountCommands) -> Result<AccountForm> {
    let form = match cmd {
        AccountCommands::Login(args) => AccountForm::Login(LoginForm {
            email: text_or_prompt(args.email, "Email", None)?,
            password: Password::new().with_prompt("Password").interact()?,
            remember_me: args.remember_me,
        }),

        AccountCommands::Signup(args) => AccountForm::Signup(SignupForm {
            name: text_or_prompt(args.name, "Full name", None)?,
            email: text_or_prompt(args.email, "Email", None)?,
            password: Password::new().with_prompt("Password").interact()?,
            confirm_password: Password::new()
                .with_prompt("Confirm password")
                .interact()?,
            accept_terms: args.accept_terms,
        }),

        AccountCommands::Profile(args) => {
            let name = text_or_prompt(args.name, "Name", Some("John Doe"))?;
            let email = text_or_prompt(args.email, "Email", Some("john.doe@example.com"))?;
            let mut form = ProfileForm {
                name,
                email,
                ..Default::default()
            };
            if args.change_password {
                form.current_password = Some(secret("Current password")?);
                form.new_password = Some(secret("New password")?);
                form.confirm_password = Some(secret("Confirm new password")?);
            }
            AccountForm::Profile(form)
        }

        AccountCommands::ForgotPassword { email } => AccountForm::ForgotPassword(ForgotPasswordForm {
            email: text_or_prompt(email, "Email", None)?,
        }),
    };
    Ok(form)
}

fn text_or_prompt(value: Option<String>, prompt: &str, default: Option<&str>) -> Result<String> {
    if let Some(value) = value {
        return Ok(value);
    }
    let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);
    if let Some(default) = default {
        input = input.default(default.to_string());
    }
    Ok(input.interact_text()?)
}

fn secret(prompt: &str) -> Result<String> {
    Ok(Password::new()
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact()?)
}

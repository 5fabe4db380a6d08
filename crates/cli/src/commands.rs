//! CLI commands

use anyhow::{Context, Result, bail};
use clap::Subcommand;
use glow_core::onboarding::{
    Category, CategorySelection, CompanyProfile, SignInForm, SignUpForm, TimeOfDay,
    VerifyOtpRequest, Weekday,
};
use glow_core::{GlowSettings, Validate};
use glow_http::{ApiRequest, ApiResponse, GlowClient, Method};
use serde_json::Value;
use std::path::PathBuf;
use tracing::info;

use crate::config;

#[derive(Subcommand)]
pub enum Commands {
    /// Send a raw request to the API and print the response envelope
    Request {
        /// HTTP method (GET, POST, PUT or DELETE)
        method: Method,

        /// Path appended to the base URL, e.g. /auth/sign-up
        path: String,

        /// JSON body
        #[arg(long)]
        body: Option<String>,

        /// Do not send the stored credential
        #[arg(long)]
        no_auth: bool,
    },

    /// Sign in and store the returned credential
    SignIn {
        #[arg(long)]
        email: String,

        #[arg(long, env = "GLOW_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account; a one-time code is emailed
    SignUp {
        #[arg(long)]
        email: String,

        #[arg(long, env = "GLOW_PASSWORD", hide_env_values = true)]
        password: String,

        /// Defaults to the password
        #[arg(long)]
        confirm_password: Option<String>,
    },

    /// Confirm the one-time code received after sign-up
    VerifyOtp {
        #[arg(long)]
        email: String,

        #[arg(long)]
        otp: String,
    },

    /// Forget the stored credential
    SignOut,

    /// Business onboarding steps
    Onboarding {
        #[command(subcommand)]
        command: OnboardingCommands,
    },

    /// Settings file operations
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum OnboardingCommands {
    /// Validate the company profile and print it as sent to the backend
    CompanyProfile {
        #[arg(long)]
        name: String,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long)]
        address: String,

        /// Opening time, HH:MM
        #[arg(long, default_value = "06:00")]
        opens: TimeOfDay,

        /// Closing time, HH:MM
        #[arg(long, default_value = "17:00")]
        closes: TimeOfDay,

        /// Operating day (seg, ter, qua, qui, sex, sab, dom); repeat to toggle
        #[arg(long = "day")]
        days: Vec<Weekday>,
    },

    /// Pick the service categories the business offers
    Categories {
        /// Category id; repeat to toggle. Without any, lists the catalogue
        #[arg(long = "select")]
        selected: Vec<Category>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate a settings file with the defaults
    Init {
        /// Output file path (defaults to <data dir>/glow.json)
        output: Option<PathBuf>,
    },

    /// Print the effective settings
    Show,
}

impl Commands {
    pub async fn execute(self, client: &GlowClient, settings: &GlowSettings) -> Result<()> {
        match self {
            Self::Request {
                method,
                path,
                body,
                no_auth,
            } => {
                let mut request = ApiRequest::new(method, path);
                if let Some(body) = body {
                    let body: Value =
                        serde_json::from_str(&body).context("--body is not valid JSON")?;
                    request = request.with_body(body);
                }
                if no_auth {
                    request = request.without_credential();
                }
                let envelope: ApiResponse = client.issue_request(&request).await;
                print_envelope(&envelope)
            }
            Self::SignIn { email, password } => {
                let form = SignInForm { email, password };
                check(&form)?;
                let envelope = client.sign_in(&form).await;
                print_envelope(&envelope)
            }
            Self::SignUp {
                email,
                password,
                confirm_password,
            } => {
                let form = SignUpForm {
                    email,
                    confirm_password: confirm_password.unwrap_or_else(|| password.clone()),
                    password,
                };
                check(&form)?;
                let envelope = client.sign_up(&form).await;
                print_envelope(&envelope)
            }
            Self::VerifyOtp { email, otp } => {
                let request = VerifyOtpRequest { email, otp };
                check(&request)?;
                let envelope = client.verify_otp(&request).await;
                print_envelope(&envelope)
            }
            Self::SignOut => {
                client.sign_out().await?;
                println!("Signed out");
                Ok(())
            }
            Self::Onboarding { command } => command.execute(),
            Self::Config { command } => command.execute(settings),
        }
    }
}

impl OnboardingCommands {
    pub fn execute(self) -> Result<()> {
        match self {
            Self::CompanyProfile {
                name,
                description,
                address,
                opens,
                closes,
                days,
            } => {
                let mut profile = CompanyProfile {
                    name,
                    description,
                    address,
                    opening_time: opens,
                    closing_time: closes,
                    ..CompanyProfile::default()
                };
                for day in days {
                    profile.toggle_day(day);
                }
                check(&profile)?;
                println!("{}", serde_json::to_string_pretty(&profile)?);
                Ok(())
            }
            Self::Categories { selected } => {
                let selection = select_categories(&selected);
                for category in Category::ALL {
                    let mark = if selection.contains(category) { "x" } else { " " };
                    println!("[{mark}] {:<12} {category}", category.id());
                }
                println!("{}", selection.summary());
                if selected.is_empty() {
                    return Ok(());
                }
                if !selection.can_continue() {
                    bail!("Selecione pelo menos uma categoria");
                }
                println!("{}", serde_json::to_string(&selection)?);
                Ok(())
            }
        }
    }
}

/// Apply each pick as a toggle, in order
fn select_categories(picks: &[Category]) -> CategorySelection {
    let mut selection = CategorySelection::new();
    for category in picks {
        selection.toggle(*category);
    }
    selection
}

impl ConfigCommands {
    pub fn execute(self, settings: &GlowSettings) -> Result<()> {
        match self {
            Self::Init { output } => {
                let config_path = output.unwrap_or_else(|| settings.data_dir.join("glow.json"));
                config::generate_default_settings(&config_path)?;
                info!("Generated settings at {}", config_path.display());
                println!("Generated settings at: {}", config_path.display());
                Ok(())
            }
            Self::Show => {
                println!("{}", serde_json::to_string_pretty(settings)?);
                Ok(())
            }
        }
    }
}

/// Validate a form locally before it is sent
fn check<F: Validate>(form: &F) -> Result<()> {
    if let Err(errors) = form.validate() {
        for error in &errors.errors {
            eprintln!("{}: {}", error.field, error.message);
        }
        bail!("{} invalid field(s)", errors.errors.len());
    }
    Ok(())
}

fn print_envelope<T: serde::Serialize>(envelope: &ApiResponse<T>) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(envelope)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(subcommand)]
        command: Commands,
    }

    #[test]
    fn company_profile_args_parse_into_typed_values() {
        let cli = TestCli::try_parse_from([
            "glow",
            "onboarding",
            "company-profile",
            "--name",
            "Studio Bella",
            "--address",
            "Rua das Flores, 120",
            "--closes",
            "18:30",
            "--day",
            "seg",
            "--day",
            "sab",
        ])
        .unwrap();

        let Commands::Onboarding {
            command:
                OnboardingCommands::CompanyProfile {
                    opens, closes, days, ..
                },
        } = cli.command
        else {
            panic!("expected onboarding company-profile");
        };
        assert_eq!(opens.to_string(), "06:00");
        assert_eq!(closes.to_string(), "18:30");
        assert_eq!(days, vec![Weekday::Monday, Weekday::Saturday]);
    }

    #[test]
    fn company_profile_rejects_bad_time() {
        assert!(
            TestCli::try_parse_from([
                "glow",
                "onboarding",
                "company-profile",
                "--name",
                "x",
                "--address",
                "y",
                "--opens",
                "6h",
            ])
            .is_err()
        );
    }

    #[test]
    fn company_profile_without_days_fails_validation() {
        let command = OnboardingCommands::CompanyProfile {
            name: "Studio Bella".to_string(),
            description: String::new(),
            address: "Rua das Flores, 120".to_string(),
            opens: "06:00".parse().unwrap(),
            closes: "17:00".parse().unwrap(),
            days: Vec::new(),
        };
        assert!(command.execute().is_err());
    }

    #[test]
    fn repeated_pick_deselects() {
        let selection =
            select_categories(&[Category::Cabelo, Category::Unhas, Category::Cabelo]);
        assert_eq!(selection.iter().collect::<Vec<_>>(), vec![Category::Unhas]);
        assert!(selection.can_continue());

        let command = OnboardingCommands::Categories {
            selected: vec![Category::Unhas, Category::Unhas],
        };
        assert!(command.execute().is_err());
    }
}

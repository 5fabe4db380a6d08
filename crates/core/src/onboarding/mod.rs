//! Business onboarding domain
//!
//! Sign-in and sign-up forms, the OTP check, and the two wizard steps that
//! follow account creation: the company profile and category selection.

pub mod categories;
pub mod company;
pub mod forms;

pub use categories::{Category, CategorySelection};
pub use company::{CompanyProfile, TimeOfDay, Weekday};
pub use forms::{SignInForm, SignUpForm, VerifyOtpRequest};

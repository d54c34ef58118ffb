//! Hand-off of accepted registrations

use crate::state::{FormState, JobRole, PaymentMethod, ShirtDesign, ShirtSize, Submission};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Payment details carried with a registration. Card numbers are masked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "method", rename_all = "kebab-case")]
pub enum PaymentDetails {
    CreditCard {
        card_last_four: String,
        zip: String,
        exp_month: u32,
        exp_year: u32,
    },
    #[serde(rename = "paypal")]
    PayPal,
    Bitcoin,
}

/// Snapshot of a form that passed validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub job_role: Option<JobRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_job_role: Option<String>,
    pub shirt_size: ShirtSize,
    pub shirt_design: Option<ShirtDesign>,
    pub shirt_color: Option<String>,
    pub activities: Vec<String>,
    pub total_cost: u32,
    pub payment: PaymentDetails,
    pub submitted_at: DateTime<Utc>,
}

impl Registration {
    /// Build the registration for a submission that may proceed
    pub fn accepted(
        state: &FormState,
        submission: &Submission,
        submitted_at: DateTime<Utc>,
    ) -> Option<Self> {
        if !submission.should_proceed() {
            return None;
        }
        let form = &state.form;
        let payment = match form.payment_method {
            PaymentMethod::CreditCard => {
                let digits = form.cc_number.as_text();
                let last_four = &digits[digits.len().saturating_sub(4)..];
                PaymentDetails::CreditCard {
                    card_last_four: last_four.to_string(),
                    zip: form.zip.as_text().to_string(),
                    exp_month: form.exp_month,
                    exp_year: form.exp_year,
                }
            }
            PaymentMethod::PayPal => PaymentDetails::PayPal,
            PaymentMethod::Bitcoin => PaymentDetails::Bitcoin,
        };
        let other_job_role = (form.job_role == Some(JobRole::Other))
            .then(|| form.other_job_role.as_text().to_string())
            .filter(|text| !text.is_empty());

        Some(Self {
            name: form.name.as_text().to_string(),
            email: form.email.as_text().to_string(),
            job_role: form.job_role,
            other_job_role,
            shirt_size: form.shirt_size,
            shirt_design: form.shirt_design,
            shirt_color: form.shirt_color.clone(),
            activities: form.selected_activities.iter().cloned().collect(),
            total_cost: state.derived.total_cost,
            payment,
            submitted_at,
        })
    }
}

/// Receiver of accepted registrations, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
pub trait RegistrationSink {
    fn submit(&mut self, registration: &Registration) -> Result<()>;
}

/// Sink that records each registration as a structured log event
#[derive(Debug, Default)]
pub struct LogSink;

impl RegistrationSink for LogSink {
    fn submit(&mut self, registration: &Registration) -> Result<()> {
        let json = serde_json::to_string(registration)?;
        tracing::info!(
            total_cost = registration.total_cost,
            registration = %json,
            "Registration accepted"
        );
        Ok(())
    }
}

//! Raw registration form input

use super::field::FormField;
use crate::state::catalog::{JobRole, ShirtDesign, ShirtSize, EXPIRATION_MONTHS, EXPIRATION_YEARS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// How the attendee pays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    #[default]
    CreditCard,
    #[serde(rename = "paypal")]
    PayPal,
    Bitcoin,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::CreditCard,
        PaymentMethod::PayPal,
        PaymentMethod::Bitcoin,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::CreditCard => "Credit Card",
            Self::PayPal => "PayPal",
            Self::Bitcoin => "Bitcoin",
        }
    }

    /// Text shown in the payment panel for methods handled off-site
    pub fn instructions(&self) -> Option<&'static str> {
        match self {
            Self::CreditCard => None,
            Self::PayPal => Some(
                "We'll take you to PayPal's site to set up your billing information, \
                 when you click \"Register\" below.",
            ),
            Self::Bitcoin => Some(
                "We'll take you to the Coinbase site to set up your billing information. \
                 Due to the nature of exchanging Bitcoin, all Bitcoin transactions will be final.",
            ),
        }
    }
}

/// Every raw value the attendee can enter
#[derive(Debug, Clone)]
pub struct RegistrationForm {
    pub name: FormField,
    pub email: FormField,
    pub job_role: Option<JobRole>,
    pub other_job_role: FormField,
    pub shirt_size: ShirtSize,
    pub shirt_design: Option<ShirtDesign>,
    pub shirt_color: Option<String>,
    /// Ids of checked activities
    pub selected_activities: BTreeSet<String>,
    pub payment_method: PaymentMethod,
    pub cc_number: FormField,
    pub zip: FormField,
    pub cvv: FormField,
    pub exp_month: u32,
    pub exp_year: u32,
}

impl RegistrationForm {
    pub fn new(payment_method: PaymentMethod) -> Self {
        Self {
            name: FormField::text("Name"),
            email: FormField::text("Email Address"),
            job_role: None,
            other_job_role: FormField::text("Other Job Role"),
            shirt_size: ShirtSize::M,
            shirt_design: None,
            shirt_color: None,
            selected_activities: BTreeSet::new(),
            payment_method,
            cc_number: FormField::text("Card Number"),
            zip: FormField::text("Zip Code"),
            cvv: FormField::secret("CVV"),
            exp_month: *EXPIRATION_MONTHS.start(),
            exp_year: *EXPIRATION_YEARS.start(),
        }
    }

    pub fn is_checked(&self, activity_id: &str) -> bool {
        self.selected_activities.contains(activity_id)
    }
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self::new(PaymentMethod::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_form_is_empty() {
        let form = RegistrationForm::default();
        assert_eq!(form.name.as_text(), "");
        assert_eq!(form.email.as_text(), "");
        assert!(form.job_role.is_none());
        assert!(form.shirt_design.is_none());
        assert!(form.shirt_color.is_none());
        assert!(form.selected_activities.is_empty());
        assert_eq!(form.payment_method, PaymentMethod::CreditCard);
        assert_eq!(form.exp_month, 1);
        assert_eq!(form.exp_year, 2026);
    }

    #[test]
    fn test_cvv_is_masked() {
        let form = RegistrationForm::default();
        assert!(form.cvv.is_secret);
        assert!(!form.cc_number.is_secret);
    }

    #[test]
    fn test_payment_method_serializes_as_kebab_case() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::CreditCard).unwrap(),
            "\"credit-card\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentMethod::PayPal).unwrap(),
            "\"paypal\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Bitcoin).unwrap(),
            "\"bitcoin\""
        );
    }

    #[test]
    fn test_only_offsite_methods_have_instructions() {
        assert!(PaymentMethod::CreditCard.instructions().is_none());
        assert!(PaymentMethod::PayPal.instructions().is_some());
        assert!(PaymentMethod::Bitcoin.instructions().is_some());
    }
}

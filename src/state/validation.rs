//! Field validators and the hint messages shown for failures

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z]+ [a-zA-Z]+$").expect("name pattern compiles"));

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[^@\s]+@[^@.\s]+\.[a-z]+$").expect("email pattern compiles")
});

static CREDIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{13,16}$").expect("card pattern compiles"));

static ZIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5}$").expect("zip pattern compiles"));

static CVV_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{3}$").expect("cvv pattern compiles"));

/// Fields that take part in validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldName {
    Name,
    Email,
    Activities,
    CreditCardNumber,
    Zip,
    Cvv,
}

impl FieldName {
    pub const ALL: [FieldName; 6] = [
        FieldName::Name,
        FieldName::Email,
        FieldName::Activities,
        FieldName::CreditCardNumber,
        FieldName::Zip,
        FieldName::Cvv,
    ];

    /// Whether the field belongs to the credit card panel
    pub fn is_credit_card_field(&self) -> bool {
        matches!(self, Self::CreditCardNumber | Self::Zip | Self::Cvv)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Activities => "Activities",
            Self::CreditCardNumber => "Card Number",
            Self::Zip => "Zip Code",
            Self::Cvv => "CVV",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why a field failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvalidReason {
    Blank,
    BadFormat,
}

/// Outcome of validating one field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Validity {
    #[default]
    Valid,
    Invalid(InvalidReason),
}

impl Validity {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Hint text to render next to `field`, if any
    pub fn message(&self, field: FieldName) -> Option<&'static str> {
        match self {
            Self::Valid => None,
            Self::Invalid(reason) => Some(hint(field, *reason)),
        }
    }

    /// Blank for empty input, otherwise valid or bad format per `matches`
    fn of_text(value: &str, matches: bool) -> Self {
        if value.is_empty() {
            Self::Invalid(InvalidReason::Blank)
        } else if matches {
            Self::Valid
        } else {
            Self::Invalid(InvalidReason::BadFormat)
        }
    }
}

/// Message lookup table for failed fields
pub fn hint(field: FieldName, reason: InvalidReason) -> &'static str {
    match (field, reason) {
        (FieldName::Name, InvalidReason::Blank) => "Name field cannot be blank",
        (FieldName::Name, InvalidReason::BadFormat) => {
            "Name must be a first and last name separated by a single space"
        }
        (FieldName::Email, InvalidReason::Blank) => "Email field cannot be blank",
        (FieldName::Email, InvalidReason::BadFormat) => "Email address must be formatted correctly",
        (FieldName::Activities, _) => "Choose at least one activity",
        (FieldName::CreditCardNumber, _) => "Credit card number must be between 13 - 16 digits",
        (FieldName::Zip, _) => "Zip Code must be 5 digits",
        (FieldName::Cvv, _) => "CVV must be 3 digits",
    }
}

pub fn is_valid_name(value: &str) -> bool {
    NAME_RE.is_match(value)
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

pub fn is_valid_credit(value: &str) -> bool {
    CREDIT_RE.is_match(value)
}

pub fn is_valid_zip(value: &str) -> bool {
    ZIP_RE.is_match(value)
}

pub fn is_valid_cvv(value: &str) -> bool {
    CVV_RE.is_match(value)
}

pub fn validate_name(value: &str) -> Validity {
    Validity::of_text(value, is_valid_name(value))
}

pub fn validate_email(value: &str) -> Validity {
    Validity::of_text(value, is_valid_email(value))
}

pub fn validate_credit(value: &str) -> Validity {
    Validity::of_text(value, is_valid_credit(value))
}

pub fn validate_zip(value: &str) -> Validity {
    Validity::of_text(value, is_valid_zip(value))
}

pub fn validate_cvv(value: &str) -> Validity {
    Validity::of_text(value, is_valid_cvv(value))
}

/// The activities group passes once anything with a cost is selected
pub fn validate_activities(total_cost: u32) -> Validity {
    if total_cost > 0 {
        Validity::Valid
    } else {
        Validity::Invalid(InvalidReason::Blank)
    }
}

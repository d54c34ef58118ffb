//! Form domain layer
//!
//! Raw registration input, the text fields it is made of, and the pure
//! functions that derive visibility, totals and validity from it.

mod field;
mod form_state;
mod registration;

pub use field::FormField;
pub use form_state::{DerivedState, FormEvent, FormState, SubmitDecision, Submission};
pub use registration::{PaymentMethod, RegistrationForm};

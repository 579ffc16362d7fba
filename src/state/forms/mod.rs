//! Form domain layer
//!
//! Type-safe fields, the steps that group them, the discovery question
//! catalog and step validation.

mod catalog;
mod field;
mod form_state;
mod validation;

pub use catalog::discovery_steps;
pub use field::{FieldValue, FormField, SCALE_MAX, SCALE_MIN};
pub use form_state::{Form, FormState, Step};
pub use validation::{validate_step, StepValidation, VALIDATION_MESSAGE};

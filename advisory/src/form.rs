//! Required-field validation shared by every recommendation form.

use crate::error::ValidationError;

/// A form whose fields must all be filled before it may be submitted.
pub trait RequiredFields {
    /// Wire name and current value of every required field, in the order
    /// the form presents them. The first empty one is reported.
    fn fields(&self) -> Vec<(&'static str, &str)>;

    /// Reject the form if any field is blank.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] naming the first blank field.
    fn validate(&self) -> Result<(), ValidationError> {
        match self.fields().into_iter().find(|(_, value)| value.trim().is_empty()) {
            Some((name, _)) => Err(ValidationError::MissingField(name)),
            None => Ok(()),
        }
    }
}

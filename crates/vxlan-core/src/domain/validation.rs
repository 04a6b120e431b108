use crate::domain::{entities::ServiceIntent, error::DomainError};

/// Centralized domain validation.
///
/// Intent-only checks live here; cardinality against the fabric is checked
/// by the fan-out itself, where the violating entity is known.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_intent(intent: &ServiceIntent) -> Result<(), DomainError> {
        intent.validate()
    }
}

//! Validation problems and their combined error.

use std::fmt;

use thiserror::Error;

/// A single problem found in a proxy's configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("no listener")]
    MissingListener,

    /// The listener uses RDS but its route table never arrived.
    #[error("no route")]
    MissingRoute,

    /// The SNI is not a declared upstream, or its cluster was never observed.
    #[error("no cluster for sni {0}")]
    MissingCluster(String),

    #[error("no cluster load assignment for cluster {0}")]
    MissingLoadAssignment(String),

    #[error("zero healthy endpoints for cluster {0}")]
    ZeroHealthyEndpoints(String),

    #[error("zero healthy endpoints for aggregate cluster {0}")]
    ZeroHealthyEndpointsAggregate(String),

    #[error("no clusters found on route or listener")]
    NoRequiredResources,
}

/// Every problem found in one validation pass, in detection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ValidationError) {
        tracing::warn!(error = %error, "Validation problem");
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    pub fn contains(&self, error: &ValidationError) -> bool {
        self.errors.contains(error)
    }

    /// `Ok(())` when nothing was reported.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.as_slice() {
            [] => write!(f, "no errors"),
            [single] => write!(f, "1 error occurred:\n\t* {}", single),
            many => {
                write!(f, "{} errors occurred:", many.len())?;
                for err in many {
                    write!(f, "\n\t* {}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            ValidationError::MissingCluster("db".into()).to_string(),
            "no cluster for sni db"
        );
        assert_eq!(
            ValidationError::ZeroHealthyEndpointsAggregate("agg".into()).to_string(),
            "zero healthy endpoints for aggregate cluster agg"
        );
    }

    #[test]
    fn test_combined_display() {
        let mut errors = ValidationErrors::new();
        errors.push(ValidationError::MissingListener);
        errors.push(ValidationError::NoRequiredResources);

        assert_eq!(
            errors.to_string(),
            "2 errors occurred:\n\t* no listener\n\t* no clusters found on route or listener"
        );
    }

    #[test]
    fn test_into_result() {
        assert!(ValidationErrors::new().into_result().is_ok());

        let mut errors = ValidationErrors::new();
        errors.push(ValidationError::MissingRoute);
        let err = errors.into_result().unwrap_err();
        assert_eq!(err.to_string(), "1 error occurred:\n\t* no route");
    }
}

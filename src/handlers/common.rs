use validator::Validate;

use crate::errors::{ApiError, ServiceError};

/// Validate request input before touching the service layer. Field-level
/// messages travel in the error body's `details`.
pub fn validate_input<T: Validate>(input: &T) -> Result<(), ApiError> {
    input.validate().map_err(|e| ApiError::ValidationError {
        message: "Validation failed".to_string(),
        details: Some(e.to_string()),
    })
}

/// Map service errors to API errors.
pub fn map_service_error(err: ServiceError) -> ApiError {
    ApiError::ServiceError(err)
}

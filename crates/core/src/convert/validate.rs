//! Request-shape validation, run before any item is touched.

use super::error::ValidationError;
use super::types::{ConversionForm, ConversionRequest, TargetFormat};

/// Checks the file set first, then the target format. Fails closed.
pub fn validate(form: ConversionForm) -> Result<ConversionRequest, ValidationError> {
    let ConversionForm {
        files,
        target_format,
    } = form;

    if files.is_empty() {
        return Err(ValidationError::NoFiles);
    }

    let target_format = target_format
        .as_deref()
        .and_then(|value| value.parse::<TargetFormat>().ok())
        .ok_or_else(|| ValidationError::InvalidTargetFormat {
            value: target_format.clone(),
        })?;

    Ok(ConversionRequest {
        files,
        target_format,
    })
}

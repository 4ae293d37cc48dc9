use crate::core::error::{ValidationError, ValidationErrors};
use crate::models::protocol::{CreateRequest, PatchRequest};

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(())
}

pub fn validate_login(login: &str) -> Result<(), ValidationError> {
    if login.is_empty() {
        return Err(ValidationError::EmptyLogin);
    }
    Ok(())
}

/// Check the fields of a create request, reporting every violation.
/// The password is not checked.
pub fn validate_create(req: &CreateRequest) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    errors.collect(validate_name(&req.name));
    errors.collect(validate_login(&req.login));
    errors.into_result()
}

/// Check only the fields present on a patch request
pub fn validate_patch(req: &PatchRequest) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if let Some(name) = &req.name {
        errors.collect(validate_name(name));
    }
    if let Some(login) = &req.login {
        errors.collect(validate_login(login));
    }
    errors.into_result()
}

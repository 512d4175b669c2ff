use crate::{error::MissingRoleError, Invoker};

///
/// Validates that the caller's token was issued for the role.
///
/// ### Errors
/// - [MissingRoleError] when the token carries any other role
///
pub fn require_role(invoker: &Invoker, role: &str) -> Result<(), MissingRoleError> {
    match invoker.role == role {
        true => Ok(()),
        false => Err(MissingRoleError {
            missing_role: role.to_string(),
        }),
    }
}

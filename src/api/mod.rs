pub mod attendance;
pub mod calendar;
pub mod dashboard;
pub mod group;
pub mod report;
pub mod student;

use crate::error::Error;

/// Destructive endpoints never act without the caller's explicit
/// confirmation; the gate lives here at the boundary, not in the core.
pub(crate) fn require_confirmation(confirm: Option<bool>) -> Result<(), Error> {
    if confirm == Some(true) {
        Ok(())
    } else {
        Err(Error::Validation(
            "Destructive operation requires confirm=true".to_string(),
        ))
    }
}

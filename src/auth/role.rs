//!
//! All roles used within application
//!

use strum::AsRefStr;

#[derive(AsRefStr)]
pub enum Role {
    /// Issued to the database webhook, never to end users
    #[strum(serialize = "service_role")]
    Service,
}

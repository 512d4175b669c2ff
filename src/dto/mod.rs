//!
//! Module with all dtos that are passed between server and its callers
//!

pub mod de_opaque_id;
pub mod input;
pub mod output;

mod role;

pub use role::*;

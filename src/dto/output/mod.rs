mod delivery_outcome;

pub use delivery_outcome::*;

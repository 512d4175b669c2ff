mod push_payload;

pub use push_payload::*;

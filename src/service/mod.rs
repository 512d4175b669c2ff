pub mod dispatch_service;
pub mod push_service;

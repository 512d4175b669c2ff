mod claims;
mod invoker;

pub(crate) use claims::Claims;
pub use invoker::Invoker;

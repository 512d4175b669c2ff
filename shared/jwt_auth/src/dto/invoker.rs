use std::{ops::Deref, sync::Arc};

///
/// Caller identity retrieved from a verified JWT.
///
/// Cloned into every request extension, so the data lives behind an Arc.
///
#[derive(Clone)]
pub struct Invoker {
    inner: Arc<InnerInvoker>,
}

pub struct InnerInvoker {
    /// Absent for service keys, which are not bound to any user
    pub subject: Option<String>,
    pub role: String,
}

impl Invoker {
    pub fn new(subject: Option<String>, role: String) -> Self {
        Self {
            inner: Arc::new(InnerInvoker { subject, role }),
        }
    }
}

impl Deref for Invoker {
    type Target = InnerInvoker;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

///
/// Acknowledgement of a push service that accepted the message.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PushReceipt {
    pub status_code: u16,
}

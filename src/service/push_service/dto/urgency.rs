use strum::{AsRefStr, EnumString};

///
/// Value of the `Urgency` header. Push services use it to decide
/// whether a message may wake up a device on low battery.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Urgency {
    VeryLow,
    Low,
    Normal,
    High,
}

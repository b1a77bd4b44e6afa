use crate::codec::Format;

/// Options that influence subscription behavior.
pub trait SubOptTrait {
    /// Acknowledge each message as soon as it is received, before decoding.
    fn get_auto_ack(&self) -> bool;
    fn get_format(&self) -> Format;
}

/// Plain subscription options.
///
/// `auto_ack` defaults to `true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubOptions {
    auto_ack: bool,
    format: Format,
}

impl SubOptions {
    pub fn new(format: Format) -> Self {
        Self {
            auto_ack: true,
            format,
        }
    }

    pub fn auto_ack(mut self, auto_ack: bool) -> Self {
        self.auto_ack = auto_ack;
        self
    }

    pub fn format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }
}

impl SubOptTrait for SubOptions {
    fn get_auto_ack(&self) -> bool {
        self.auto_ack
    }

    fn get_format(&self) -> Format {
        self.format
    }
}

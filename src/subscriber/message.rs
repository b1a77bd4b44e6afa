use std::fmt;

use crate::errors::SubError;
use crate::transport::AckHandle;

/// One item of a typed subscription.
///
/// `item` holds either the decoded value or the reason this message could
/// not be delivered as one. The ack handle is attached in both cases, so an
/// undecodable message can still be acknowledged and discarded.
pub struct SubMessage<T> {
    pub item: Result<T, SubError>,
    pub ack: AckHandle,
}

impl<T> SubMessage<T> {
    pub fn is_ok(&self) -> bool {
        self.item.is_ok()
    }

    pub fn into_parts(self) -> (Result<T, SubError>, AckHandle) {
        (self.item, self.ack)
    }
}

impl<T: fmt::Debug> fmt::Debug for SubMessage<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubMessage")
            .field("item", &self.item)
            .field("ack", &"AckHandle")
            .finish()
    }
}

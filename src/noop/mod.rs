//! No-operation ack and unsubscribe handlers.
//!
//! Useful in tests and for backends where acknowledging or cancelling has
//! no meaning. Neither is ever installed implicitly: a `Sub` without an
//! unsubscribe handler fails loudly instead of quietly falling back to
//! `UnSubNoop`.

use async_trait::async_trait;

use crate::errors::{AckError, UnSubError};
use crate::transport::{AckTrait, UnSubTrait};

/// Acknowledgment handler that performs no operation.
#[derive(Debug, Default, Clone, Copy)]
pub struct AckNoop;

#[async_trait]
impl AckTrait for AckNoop {
    async fn ack(&self) -> Result<(), AckError> {
        Ok(())
    }
}

/// Unsubscribe handler that performs no operation.
///
/// With `should_err` set, every call fails with `UnSubError::NoHandler`,
/// which lets tests exercise the missing-handler path.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnSubNoop {
    should_err: bool,
}

impl UnSubNoop {
    pub fn new(should_err: bool) -> Self {
        Self { should_err }
    }
}

#[async_trait]
impl UnSubTrait for UnSubNoop {
    async fn unsubscribe(&self) -> Result<(), UnSubError> {
        if self.should_err {
            return Err(UnSubError::NoHandler);
        }
        Ok(())
    }
}

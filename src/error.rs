use thiserror::Error;

/// Why a driver operation did not complete.
///
/// Every variant is recoverable and none of them leaves a register half
/// written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The driver is not bound to a usable register block.
    #[error("driver is not bound to a valid register block")]
    InvalidHandle,
    /// `initialize` has not been called on this driver.
    #[error("UART is not initialized")]
    NotInitialized,
    /// The awaited ready bit never appeared within the poll policy.
    #[error("timed out waiting for the UART to become ready")]
    Timeout,
}

pub type Result<T, E = Error> = core::result::Result<T, E>;

//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`Overpayment`] thrown when a posting exceeds a contract's remaining
//!   balance.
//! - [`KeyNotFound`] thrown when an item is not found.
//! - [`InvalidTransition`] thrown on a status change the lifecycle forbids.
//!
//!  [`Overpayment`]: EngineError::Overpayment
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`InvalidTransition`]: EngineError::InvalidTransition
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Overpayment: {0}")]
    Overpayment(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Overpayment(a), Self::Overpayment(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidDate(a), Self::InvalidDate(b)) => a == b,
            (Self::InvalidTransition(a), Self::InvalidTransition(b)) => a == b,
            _ => false,
        }
    }
}

//! Core errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Command already registered: {0}")]
    AlreadyRegistered(String),
}

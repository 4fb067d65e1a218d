//! ABI identifiers and library inventories for abipick.
//!
//! This crate defines the data model shared by the scanner and the selector:
//! the bounded `AbiName` identifier with the well-known Android ABI names, and
//! `AbiInventory`, the sorted list of native library basenames found in one
//! `lib/<abi>/` folder of a package (or the "mixed" marker when that folder
//! carries binaries built for another architecture).

pub mod inventory;
pub mod types;

pub use inventory::{AbiInventory, InventoryState, MIXED_SENTINEL};
pub use types::{AbiName, ABI_NAME_MAX_LENGTH, ARM64_V8A, ARMEABI, ARMEABI_V7A, X86, X86_64};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("invalid ABI name '{name}': {reason}")]
    InvalidAbiName { name: String, reason: &'static str },
}

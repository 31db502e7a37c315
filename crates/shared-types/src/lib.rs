//! # Shared Types Crate
//!
//! Domain entities shared by every subsystem of the designated-verifier
//! middleware.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: Cross-crate types are defined here once.
//! - **Integers Only**: On-chain amounts and severity scores are carried as
//!   `U256` fixed-point values. Floating point never touches an amount.
//! - **Explicit Equality**: Claim payloads compare field by field so the
//!   three-party reconciliation stays auditable.

pub mod claims;
pub mod decimal;
pub mod entities;
pub mod serde_helpers;

pub use claims::*;
pub use decimal::{format_units, parse_integer, parse_units, wad, DecimalError, WAD_DECIMALS};
pub use entities::*;
pub use primitive_types::{H160, U256, U512};

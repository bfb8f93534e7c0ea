#![deny(missing_docs)]
#![doc = "Core error, configuration and serialization types shared by the Wigner coalescence crates."]

pub mod config;
pub mod errors;
/// Canonical hashing helpers.
pub mod hash;
/// Canonical JSON serde helpers.
pub mod serde;

pub use config::{Domain, GridStep, IntegrationMode, PhysicsConfig, ReferenceOpts};
pub use errors::{ErrorInfo, WignerError};
pub use hash::stable_hash_string;
pub use crate::serde::{from_json_slice, to_canonical_json_bytes};

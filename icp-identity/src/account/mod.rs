//! Keypair records
//!
//! This module packages derived key material together with its seed phrase
//! and metadata into the record handed to whatever stores identities.

mod keypair;
mod generator;

pub use keypair::*;
pub use generator::*;

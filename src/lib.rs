//! KERI core cryptographic material codec implementation in Rust.

// Error handling module
mod errors;

// Re-export Error and Result types
pub use crate::errors::{Error, Result};

pub mod coring;
pub mod serdering;
pub mod versioning;

pub use crate::coring::cigar::Cigar;
pub use crate::coring::counter::CryCounter;
pub use crate::coring::diger::Diger;
pub use crate::coring::indexing::counter::SigCounter;
pub use crate::coring::indexing::siger::Siger;
pub use crate::coring::nexter::Nexter;
pub use crate::coring::prefixer::Prefixer;
pub use crate::coring::seqner::Seqner;
pub use crate::coring::signing::{Salter, Signer, Tiers};
pub use crate::coring::tholder::Tholder;
pub use crate::coring::verfer::Verfer;
pub use crate::coring::Matter;
pub use crate::serdering::ked::{Ked, KedValue};
pub use crate::serdering::Serder;

/// Initialize the library
pub fn init() -> Result<()> {
    // Initialize sodiumoxide
    if sodiumoxide::init().is_err() {
        return Err(Error::Validation(
            "Failed to initialize sodiumoxide".into(),
        ));
    }

    Ok(())
}

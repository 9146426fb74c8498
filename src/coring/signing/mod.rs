mod salter;
mod signer;

pub use salter::Salter;
pub use signer::Signer;

/// Secret derivation security tiers for salt stretching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tiers {
    Low,
    Med,
    High,
}

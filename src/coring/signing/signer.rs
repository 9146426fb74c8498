use sodiumoxide::crypto::sign::ed25519;
use sodiumoxide::randombytes;

use crate::coring::cigar::Cigar;
use crate::coring::indexing::siger::Siger;
use crate::coring::indexing::sig_two_dex;
use crate::coring::verfer::Verfer;
use crate::coring::{cry_one_dex, cry_two_dex, BaseMatter, Matter};
use crate::errors::{Error, Result};

/// Signer is signing key material.
///
/// .raw is the Ed25519 private key seed, .code the seed cipher suite. Owns
/// the Verfer whose .raw is the matching public key, with transferable or
/// non-transferable code per the transferable flag.
#[derive(Debug, Clone)]
pub struct Signer {
    base: BaseMatter,
    verfer: Verfer,
}

impl Signer {
    /// Creates a Signer from a raw Ed25519 seed
    pub fn new(raw: &[u8], transferable: bool) -> Result<Self> {
        let base = BaseMatter::new(raw, cry_one_dex::ED25519_SEED, 0)?;
        let verfer = Self::derive_verfer(base.raw(), transferable)?;
        Ok(Self { base, verfer })
    }

    /// Creates a Signer with a fresh random seed
    pub fn generate(transferable: bool) -> Result<Self> {
        sodiumoxide::init()
            .map_err(|_| Error::Validation("Sodium initialization failed".to_string()))?;
        let seed = randombytes::randombytes(ed25519::SEEDBYTES);
        Self::new(&seed, transferable)
    }

    /// Creates a Signer from a fully qualified Base64 secret
    pub fn from_qb64(qb64: &str, transferable: bool) -> Result<Self> {
        Self::wrap(BaseMatter::from_qb64(qb64)?, transferable)
    }

    pub fn from_qb64b(qb64b: &[u8], transferable: bool) -> Result<Self> {
        Self::wrap(BaseMatter::from_qb64b(qb64b)?, transferable)
    }

    pub fn from_qb2(qb2: &[u8], transferable: bool) -> Result<Self> {
        Self::wrap(BaseMatter::from_qb2(qb2)?, transferable)
    }

    fn wrap(base: BaseMatter, transferable: bool) -> Result<Self> {
        if base.code() != cry_one_dex::ED25519_SEED {
            return Err(Error::Validation(format!(
                "Unsupported signer code = {}",
                base.code()
            )));
        }
        let verfer = Self::derive_verfer(base.raw(), transferable)?;
        Ok(Self { base, verfer })
    }

    fn derive_verfer(seed: &[u8], transferable: bool) -> Result<Verfer> {
        let seed = ed25519::Seed::from_slice(seed)
            .ok_or_else(|| Error::Validation("Invalid Ed25519 seed".to_string()))?;
        let (pk, _) = ed25519::keypair_from_seed(&seed);
        let code = if transferable {
            cry_one_dex::ED25519
        } else {
            cry_one_dex::ED25519N
        };
        Verfer::new(pk.as_ref(), code)
    }

    /// Returns the Verfer of the matching public key
    pub fn verfer(&self) -> &Verfer {
        &self.verfer
    }

    /// Returns an unindexed Cigar signature over bytes serialization ser
    pub fn sign(&self, ser: &[u8]) -> Result<Cigar> {
        let sig = self.sign_ed25519(ser)?;
        Cigar::new(&sig, cry_two_dex::ED25519_SIG, Some(self.verfer.clone()))
    }

    /// Returns an indexed Siger signature over ser where index is the offset
    /// of the associated verification key in the event key list
    pub fn sign_indexed(&self, ser: &[u8], index: u32) -> Result<Siger> {
        let sig = self.sign_ed25519(ser)?;
        Siger::new(&sig, sig_two_dex::ED25519, index, Some(self.verfer.clone()))
    }

    fn sign_ed25519(&self, ser: &[u8]) -> Result<Vec<u8>> {
        let seed = ed25519::Seed::from_slice(self.base.raw())
            .ok_or_else(|| Error::Validation("Invalid Ed25519 seed".to_string()))?;
        let (_, sk) = ed25519::keypair_from_seed(&seed);
        Ok(ed25519::sign_detached(ser, &sk).as_ref().to_vec())
    }
}

impl Matter for Signer {
    fn code(&self) -> &str { self.base.code() }
    fn raw(&self) -> &[u8] { self.base.raw() }
    fn index(&self) -> u32 { self.base.index() }
    fn qb64(&self) -> String { self.base.qb64() }
    fn qb64b(&self) -> Vec<u8> { self.base.qb64b() }
    fn qb2(&self) -> Vec<u8> { self.base.qb2() }
    fn transferable(&self) -> bool { self.base.transferable() }
    fn digestive(&self) -> bool { self.base.digestive() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signer() {
        sodiumoxide::init().expect("sodium initialization failed");

        let seed = [0u8; 32];
        let signer = Signer::new(&seed, true).unwrap();
        assert_eq!(signer.code(), "A");
        assert_eq!(signer.raw(), &seed);
        assert_eq!(signer.verfer().code(), "D");
        assert!(signer.verfer().transferable());

        let ser = b"abcdefghijklmnopqrstuvwxyz0123456789";
        let cigar = signer.sign(ser).unwrap();
        assert_eq!(cigar.code(), "0B");
        assert_eq!(cigar.raw().len(), 64);
        assert!(signer.verfer().verify(cigar.raw(), ser));
        assert!(!signer.verfer().verify(cigar.raw(), b"other"));

        let siger = signer.sign_indexed(ser, 4).unwrap();
        assert_eq!(siger.code(), "A");
        assert_eq!(siger.index(), 4);
        assert!(signer.verfer().verify(siger.raw(), ser));

        // same seed derives the same keypair
        let signer2 = Signer::from_qb64(&signer.qb64(), true).unwrap();
        assert_eq!(signer2.verfer().qb64(), signer.verfer().qb64());

        // non-transferable verfer code
        let signer = Signer::new(&seed, false).unwrap();
        assert_eq!(signer.verfer().code(), "B");
        assert!(!signer.verfer().transferable());

        // generated signers are distinct and usable
        let signer_a = Signer::generate(true).unwrap();
        let signer_b = Signer::generate(true).unwrap();
        assert_ne!(signer_a.raw(), signer_b.raw());
        let cigar = signer_a.sign(ser).unwrap();
        assert!(signer_a.verfer().verify(cigar.raw(), ser));

        // only seed material may seed a signer
        assert!(Signer::from_qb64(&format!("B{}", "A".repeat(43)), true).is_err());
    }
}

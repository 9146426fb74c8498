use sodiumoxide::crypto::pwhash::argon2id13 as pwhash;
use sodiumoxide::randombytes;

use crate::coring::signing::{Signer, Tiers};
use crate::coring::{cry_one_dex, cry_raw_size, cry_two_dex, BaseMatter, Matter};
use crate::errors::{Error, Result};

/// Salter is random salt material for deriving secrets (private keys).
///
/// .raw is a 128 bit random salt with code Salt_128. Seeds are stretched
/// from the salt with argon2id where the derivation path is the password
/// and the security tier selects the ops and memory limits.
#[derive(Debug, Clone)]
pub struct Salter {
    base: BaseMatter,
    tier: Tiers,
}

impl Salter {
    /// Creates a Salter from 16 raw salt bytes
    pub fn new(raw: &[u8], tier: Option<Tiers>) -> Result<Self> {
        let base = BaseMatter::new(raw, cry_two_dex::SALT_128, 0)?;
        Ok(Self {
            base,
            tier: tier.unwrap_or(Tiers::Low),
        })
    }

    /// Creates a Salter with a fresh random salt
    pub fn generate(tier: Option<Tiers>) -> Result<Self> {
        sodiumoxide::init()
            .map_err(|_| Error::Validation("Sodium initialization failed".to_string()))?;
        let raw = randombytes::randombytes(pwhash::SALTBYTES);
        Self::new(&raw, tier)
    }

    pub fn from_qb64(qb64: &str, tier: Option<Tiers>) -> Result<Self> {
        Self::wrap(BaseMatter::from_qb64(qb64)?, tier)
    }

    pub fn from_qb64b(qb64b: &[u8], tier: Option<Tiers>) -> Result<Self> {
        Self::wrap(BaseMatter::from_qb64b(qb64b)?, tier)
    }

    pub fn from_qb2(qb2: &[u8], tier: Option<Tiers>) -> Result<Self> {
        Self::wrap(BaseMatter::from_qb2(qb2)?, tier)
    }

    fn wrap(base: BaseMatter, tier: Option<Tiers>) -> Result<Self> {
        if base.code() != cry_two_dex::SALT_128 {
            return Err(Error::Validation(format!(
                "Unsupported salter code = {}",
                base.code()
            )));
        }
        Ok(Self {
            base,
            tier: tier.unwrap_or(Tiers::Low),
        })
    }

    /// Returns the default security tier
    pub fn tier(&self) -> Tiers {
        self.tier
    }

    /// Returns raw seed of length size stretched from path and .raw with
    /// argon2id. temp selects the minimum limits, for testing only.
    pub fn stretch(&self, size: usize, path: &str, tier: Option<Tiers>, temp: bool) -> Result<Vec<u8>> {
        let tier = tier.unwrap_or(self.tier);

        let (opslimit, memlimit) = if temp {
            (pwhash::OpsLimit(1), pwhash::MemLimit(8192))
        } else {
            match tier {
                Tiers::Low => (pwhash::OPSLIMIT_INTERACTIVE, pwhash::MEMLIMIT_INTERACTIVE),
                Tiers::Med => (pwhash::OPSLIMIT_MODERATE, pwhash::MEMLIMIT_MODERATE),
                Tiers::High => (pwhash::OPSLIMIT_SENSITIVE, pwhash::MEMLIMIT_SENSITIVE),
            }
        };

        sodiumoxide::init()
            .map_err(|_| Error::Validation("Sodium initialization failed".to_string()))?;

        let salt = pwhash::Salt::from_slice(self.raw())
            .ok_or_else(|| Error::Validation("Invalid salt size".to_string()))?;

        let mut seed = vec![0u8; size];
        pwhash::derive_key(&mut seed, path.as_bytes(), &salt, opslimit, memlimit)
            .map_err(|_| Error::Derivation("Seed stretching failed".to_string()))?;

        Ok(seed)
    }

    /// Returns a Signer whose seed is stretched from path and .raw to the
    /// size given by code. path is the password for the stretch.
    pub fn signer(
        &self,
        path: &str,
        tier: Option<Tiers>,
        code: &str,
        transferable: bool,
        temp: bool,
    ) -> Result<Signer> {
        if code != cry_one_dex::ED25519_SEED {
            return Err(Error::Validation(format!(
                "Unsupported signer code = {}",
                code
            )));
        }
        let seed = self.stretch(cry_raw_size(code)?, path, tier, temp)?;
        Signer::new(&seed, transferable)
    }

    /// Returns count Signers with unique derivation paths made from the hex
    /// of start plus the offset for each
    pub fn signers(
        &self,
        count: usize,
        start: usize,
        path: &str,
        transferable: bool,
        temp: bool,
    ) -> Result<Vec<Signer>> {
        let mut signers = Vec::with_capacity(count);
        for i in 0..count {
            let full_path = format!("{}{:x}", path, start + i);
            signers.push(self.signer(
                &full_path,
                None,
                cry_one_dex::ED25519_SEED,
                transferable,
                temp,
            )?);
        }
        Ok(signers)
    }

    /// Returns count fully qualified Base64 secret seeds
    pub fn secrets(&self, count: usize, temp: bool) -> Result<Vec<String>> {
        let signers = self.signers(count, 0, "", true, temp)?;
        Ok(signers.iter().map(|signer| signer.qb64()).collect())
    }
}

impl Matter for Salter {
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
    fn test_salter() {
        sodiumoxide::init().expect("sodium initialization failed");

        let salter = Salter::new(b"0123456789abcdef", None).unwrap();
        assert_eq!(salter.code(), "0A");
        assert_eq!(salter.raw(), b"0123456789abcdef");
        assert_eq!(salter.tier(), Tiers::Low);
        assert_eq!(salter.qb64().len(), 24);

        let salter2 = Salter::from_qb64(&salter.qb64(), None).unwrap();
        assert_eq!(salter2.raw(), salter.raw());

        // stretching is deterministic for the same salt, path and limits
        let seed1 = salter.stretch(32, "01", None, true).unwrap();
        let seed2 = salter.stretch(32, "01", None, true).unwrap();
        assert_eq!(seed1.len(), 32);
        assert_eq!(seed1, seed2);

        // distinct paths give distinct seeds
        let other = salter.stretch(32, "02", None, true).unwrap();
        assert_ne!(seed1, other);

        // derived signer is usable and reproducible
        let signer = salter.signer("01", None, "A", true, true).unwrap();
        assert_eq!(signer.raw(), &seed1[..]);
        let signer2 = salter.signer("01", None, "A", true, true).unwrap();
        assert_eq!(signer.qb64(), signer2.qb64());
        assert_eq!(signer.verfer().qb64(), signer2.verfer().qb64());

        let ser = b"abcdefghijklmnopqrstuvwxyz0123456789";
        let cigar = signer.sign(ser).unwrap();
        assert!(signer.verfer().verify(cigar.raw(), ser));

        // only the Ed25519 seed suite is supported
        assert!(salter.signer("01", None, "B", true, true).is_err());

        // batch derivation with hex suffixed paths
        let signers = salter.signers(3, 0, "", true, true).unwrap();
        assert_eq!(signers.len(), 3);
        assert_eq!(signers[0].raw(), &salter.stretch(32, "0", None, true).unwrap()[..]);
        assert_eq!(signers[2].raw(), &salter.stretch(32, "2", None, true).unwrap()[..]);

        let secrets = salter.secrets(2, true).unwrap();
        assert_eq!(secrets.len(), 2);
        assert!(secrets.iter().all(|secret| secret.starts_with('A')));

        // random salts are distinct
        let salter_a = Salter::generate(None).unwrap();
        let salter_b = Salter::generate(None).unwrap();
        assert_ne!(salter_a.raw(), salter_b.raw());

        // wrong size salt
        assert!(Salter::new(b"too short", None).is_err());
    }
}

use sodiumoxide::crypto::sign::ed25519;

use crate::coring::{cry_one_dex, BaseMatter, Matter};
use crate::errors::{Error, Result};

/// Verfer is verification key material with a method to verify a signature
/// over a serialization using .raw as the public key and .code for the
/// signature cipher suite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verfer {
    base: BaseMatter,
}

impl Verfer {
    /// Creates a Verfer from a raw public key and code
    pub fn new(raw: &[u8], code: &str) -> Result<Self> {
        Self::wrap(BaseMatter::new(raw, code, 0)?)
    }

    pub fn from_qb64(qb64: &str) -> Result<Self> {
        Self::wrap(BaseMatter::from_qb64(qb64)?)
    }

    pub fn from_qb64b(qb64b: &[u8]) -> Result<Self> {
        Self::wrap(BaseMatter::from_qb64b(qb64b)?)
    }

    pub fn from_qb2(qb2: &[u8]) -> Result<Self> {
        Self::wrap(BaseMatter::from_qb2(qb2)?)
    }

    fn wrap(base: BaseMatter) -> Result<Self> {
        match base.code() {
            cry_one_dex::ED25519N | cry_one_dex::ED25519 => Ok(Self { base }),
            code => Err(Error::Validation(format!(
                "Unsupported code = {} for verifier",
                code
            ))),
        }
    }

    /// Returns true if bytes signature sig verifies on bytes serialization
    /// ser using .raw as the public key. Never errors on a bad signature.
    pub fn verify(&self, sig: &[u8], ser: &[u8]) -> bool {
        self.verify_ed25519(sig, ser)
    }

    fn verify_ed25519(&self, sig: &[u8], ser: &[u8]) -> bool {
        let pk = match ed25519::PublicKey::from_slice(self.raw()) {
            Some(pk) => pk,
            None => return false,
        };

        let signature = match ed25519::Signature::from_bytes(sig) {
            Ok(signature) => signature,
            Err(_) => return false,
        };

        ed25519::verify_detached(&signature, ser, &pk)
    }
}

impl Matter for Verfer {
    fn code(&self) -> &str { self.base.code() }
    fn raw(&self) -> &[u8] { self.base.raw() }
    fn index(&self) -> u32 { self.base.index() }
    fn qb64(&self) -> String { self.base.qb64() }
    fn qb64b(&self) -> Vec<u8> { self.base.qb64b() }
    fn qb2(&self) -> Vec<u8> { self.base.qb2() }
    fn transferable(&self) -> bool { self.base.transferable() }
    fn digestive(&self) -> bool { self.base.digestive() }
}

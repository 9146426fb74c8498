use crate::coring::verfer::Verfer;
use crate::coring::{cry_two_dex, BaseMatter, Matter};
use crate::errors::{Error, Result};

/// Cigar is nonindexed signature material.
///
/// .raw is the signature and .code is the signature cipher suite. Holds an
/// optional Verfer of the associated public key, bound at construction or
/// attached once after parsing.
#[derive(Debug, Clone)]
pub struct Cigar {
    base: BaseMatter,
    verfer: Option<Verfer>,
}

impl Cigar {
    /// Creates a Cigar from a raw signature and code
    pub fn new(raw: &[u8], code: &str, verfer: Option<Verfer>) -> Result<Self> {
        Ok(Self {
            base: Self::check(BaseMatter::new(raw, code, 0)?)?,
            verfer,
        })
    }

    pub fn from_qb64(qb64: &str, verfer: Option<Verfer>) -> Result<Self> {
        Ok(Self {
            base: Self::check(BaseMatter::from_qb64(qb64)?)?,
            verfer,
        })
    }

    pub fn from_qb64b(qb64b: &[u8], verfer: Option<Verfer>) -> Result<Self> {
        Ok(Self {
            base: Self::check(BaseMatter::from_qb64b(qb64b)?)?,
            verfer,
        })
    }

    pub fn from_qb2(qb2: &[u8], verfer: Option<Verfer>) -> Result<Self> {
        Ok(Self {
            base: Self::check(BaseMatter::from_qb2(qb2)?)?,
            verfer,
        })
    }

    fn check(base: BaseMatter) -> Result<BaseMatter> {
        match base.code() {
            cry_two_dex::ED25519_SIG | cry_two_dex::ECDSA_256K1_SIG => Ok(base),
            code => Err(Error::Validation(format!(
                "Invalid code = {} for Cigar",
                code
            ))),
        }
    }

    /// Returns the Verfer of the associated public key if bound
    pub fn verfer(&self) -> Option<&Verfer> {
        self.verfer.as_ref()
    }

    /// Binds the Verfer of the associated public key, typically once after
    /// parsing the couplet the signature arrived in
    pub fn attach_verfer(&mut self, verfer: Verfer) {
        self.verfer = Some(verfer);
    }
}

impl Matter for Cigar {
    fn code(&self) -> &str { self.base.code() }
    fn raw(&self) -> &[u8] { self.base.raw() }
    fn index(&self) -> u32 { self.base.index() }
    fn qb64(&self) -> String { self.base.qb64() }
    fn qb64b(&self) -> Vec<u8> { self.base.qb64b() }
    fn qb2(&self) -> Vec<u8> { self.base.qb2() }
    fn transferable(&self) -> bool { self.base.transferable() }
    fn digestive(&self) -> bool { self.base.digestive() }
}

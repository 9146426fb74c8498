use crate::coring::indexing::{sig_cnt_dex, SigMat};
use crate::coring::verfer::Verfer;
use crate::errors::{Error, Result};

/// Siger is indexed signature material.
///
/// Adds an optional Verfer of the associated verification key, bound at
/// construction or attached once after parsing.
#[derive(Debug, Clone)]
pub struct Siger {
    sigmat: SigMat,
    verfer: Option<Verfer>,
}

impl Siger {
    /// Creates a Siger from a raw signature, code and index
    pub fn new(raw: &[u8], code: &str, index: u32, verfer: Option<Verfer>) -> Result<Self> {
        Ok(Self {
            sigmat: Self::check(SigMat::new(raw, code, index)?)?,
            verfer,
        })
    }

    pub fn from_qb64(qb64: &str, verfer: Option<Verfer>) -> Result<Self> {
        Ok(Self {
            sigmat: Self::check(SigMat::from_qb64(qb64)?)?,
            verfer,
        })
    }

    pub fn from_qb64b(qb64b: &[u8], verfer: Option<Verfer>) -> Result<Self> {
        Ok(Self {
            sigmat: Self::check(SigMat::from_qb64b(qb64b)?)?,
            verfer,
        })
    }

    pub fn from_qb2(qb2: &[u8], verfer: Option<Verfer>) -> Result<Self> {
        Ok(Self {
            sigmat: Self::check(SigMat::from_qb2(qb2)?)?,
            verfer,
        })
    }

    fn check(sigmat: SigMat) -> Result<SigMat> {
        if sig_cnt_dex::TUPLE.contains(&sigmat.code()) {
            return Err(Error::Validation(format!(
                "Invalid code = {} for Siger",
                sigmat.code()
            )));
        }
        Ok(sigmat)
    }

    pub fn code(&self) -> &str {
        self.sigmat.code()
    }

    pub fn raw(&self) -> &[u8] {
        self.sigmat.raw()
    }

    /// Returns zero based offset into the signing key list
    pub fn index(&self) -> u32 {
        self.sigmat.index()
    }

    pub fn qb64(&self) -> String {
        self.sigmat.qb64()
    }

    pub fn qb64b(&self) -> Vec<u8> {
        self.sigmat.qb64b()
    }

    pub fn qb2(&self) -> Vec<u8> {
        self.sigmat.qb2()
    }

    /// Returns the Verfer of the associated public key if bound
    pub fn verfer(&self) -> Option<&Verfer> {
        self.verfer.as_ref()
    }

    /// Binds the Verfer of the associated public key
    pub fn attach_verfer(&mut self, verfer: Verfer) {
        self.verfer = Some(verfer);
    }
}

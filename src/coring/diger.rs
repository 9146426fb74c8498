use blake2::digest::consts::U32;
use blake2::{Blake2b, Blake2s256, Digest as Blake2Digest};
use sha2::Sha256;
use sha3::Sha3_256;

use crate::coring::{cry_one_dex, BaseMatter, Matter};
use crate::errors::{Error, Result};

type Blake2b256 = Blake2b<U32>;

/// Digest algorithms keyed by derivation code.
///
/// Resolved once at construction so unknown codes fail at the parse
/// boundary, never inside the digest path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum DigAlgo {
    Blake3_256,
    Blake2b_256,
    Blake2s_256,
    Sha3_256,
    Sha2_256,
}

impl DigAlgo {
    /// Resolves the algorithm for a digest derivation code
    pub fn from_code(code: &str) -> Result<Self> {
        match code {
            cry_one_dex::BLAKE3_256 => Ok(DigAlgo::Blake3_256),
            cry_one_dex::BLAKE2B_256 => Ok(DigAlgo::Blake2b_256),
            cry_one_dex::BLAKE2S_256 => Ok(DigAlgo::Blake2s_256),
            cry_one_dex::SHA3_256 => Ok(DigAlgo::Sha3_256),
            cry_one_dex::SHA2_256 => Ok(DigAlgo::Sha2_256),
            _ => Err(Error::Validation(format!(
                "Unsupported code = {} for digester",
                code
            ))),
        }
    }

    /// Computes the digest of ser
    pub fn digest(&self, ser: &[u8]) -> Vec<u8> {
        match self {
            DigAlgo::Blake3_256 => blake3::hash(ser).as_bytes().to_vec(),
            DigAlgo::Blake2b_256 => {
                let mut hasher = Blake2b256::new();
                hasher.update(ser);
                hasher.finalize().to_vec()
            }
            DigAlgo::Blake2s_256 => {
                let mut hasher = Blake2s256::new();
                hasher.update(ser);
                hasher.finalize().to_vec()
            }
            DigAlgo::Sha3_256 => {
                let mut hasher = Sha3_256::new();
                hasher.update(ser);
                hasher.finalize().to_vec()
            }
            DigAlgo::Sha2_256 => {
                let mut hasher = Sha256::new();
                hasher.update(ser);
                hasher.finalize().to_vec()
            }
        }
    }
}

/// Diger is digest material with methods to verify the digest of a
/// serialization using .raw as the digest and .code for the algorithm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diger {
    base: BaseMatter,
    algo: DigAlgo,
}

impl Diger {
    /// Creates a Diger from a precomputed raw digest and code
    pub fn new(raw: &[u8], code: &str) -> Result<Self> {
        let algo = DigAlgo::from_code(code)?;
        let base = BaseMatter::new(raw, code, 0)?;
        Ok(Self { base, algo })
    }

    /// Creates a Diger by digesting the serialization ser with code
    pub fn from_ser(ser: &[u8], code: &str) -> Result<Self> {
        let algo = DigAlgo::from_code(code)?;
        let base = BaseMatter::new(&algo.digest(ser), code, 0)?;
        Ok(Self { base, algo })
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
        let algo = DigAlgo::from_code(base.code())?;
        Ok(Self { base, algo })
    }

    /// Returns true if digest of bytes serialization ser matches .raw
    pub fn verify(&self, ser: &[u8]) -> bool {
        self.algo.digest(ser) == self.base.raw()
    }

    /// Returns true if the other digest and this one represent the same
    /// digest of ser.
    ///
    /// If the qb64 forms match, returns true without verifying either.
    /// If both carry the same code but differ, returns false without
    /// verifying. Otherwise recomputes both digests against ser so that
    /// digests of differing algorithms may still agree.
    pub fn compare(&self, ser: &[u8], other: &Diger) -> bool {
        if other.qb64b() == self.qb64b() {
            return true;
        }

        if other.code() == self.code() {
            return false;
        }

        other.verify(ser) && self.verify(ser)
    }

    /// Compares against a qb64 digest of ser, see compare
    pub fn compare_dig(&self, ser: &[u8], dig: &[u8]) -> bool {
        if dig == &self.qb64b()[..] {
            return true;
        }

        match Diger::from_qb64b(dig) {
            Ok(diger) => self.compare(ser, &diger),
            Err(_) => false,
        }
    }
}

impl Matter for Diger {
    fn code(&self) -> &str { self.base.code() }
    fn raw(&self) -> &[u8] { self.base.raw() }
    fn index(&self) -> u32 { self.base.index() }
    fn qb64(&self) -> String { self.base.qb64() }
    fn qb64b(&self) -> Vec<u8> { self.base.qb64b() }
    fn qb2(&self) -> Vec<u8> { self.base.qb2() }
    fn transferable(&self) -> bool { self.base.transferable() }
    fn digestive(&self) -> bool { self.base.digestive() }
}

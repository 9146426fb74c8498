use crate::coring::{cry_cnt_dex, BaseMatter, Matter};
use crate::errors::{Error, Result};

/// CryCounter is cryptographic count material.
///
/// Provides the count of following attached cryptographic material items in
/// its .count property. Useful when parsing attached receipt couplets from a
/// stream where the counter qb64 is inserted after the receipt statement and
/// before the attached couplets. raw is empty, only the derivation code and
/// count are part of qb64.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CryCounter {
    base: BaseMatter,
}

impl CryCounter {
    /// Creates a counter with default code for Base64 attached material
    pub fn new(count: u32) -> Result<Self> {
        Self::with_code(cry_cnt_dex::BASE64, count)
    }

    /// Creates a counter with explicit count code
    pub fn with_code(code: &str, count: u32) -> Result<Self> {
        // raw is forced empty, the count is the only payload
        let base = BaseMatter::new(b"", code, count)?;
        if !cry_cnt_dex::TUPLE.contains(&base.code()) {
            return Err(Error::Validation(format!(
                "Invalid code = {} for CryCounter",
                base.code()
            )));
        }
        Ok(Self { base })
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
        if !cry_cnt_dex::TUPLE.contains(&base.code()) {
            return Err(Error::Validation(format!(
                "Invalid code = {} for CryCounter",
                base.code()
            )));
        }
        Ok(Self { base })
    }

    /// Returns count of attached material items
    pub fn count(&self) -> u32 {
        self.base.index()
    }
}

impl Matter for CryCounter {
    fn code(&self) -> &str { self.base.code() }
    fn raw(&self) -> &[u8] { self.base.raw() }
    fn index(&self) -> u32 { self.base.index() }
    fn qb64(&self) -> String { self.base.qb64() }
    fn qb64b(&self) -> Vec<u8> { self.base.qb64b() }
    fn qb2(&self) -> Vec<u8> { self.base.qb2() }
    fn transferable(&self) -> bool { self.base.transferable() }
    fn digestive(&self) -> bool { self.base.digestive() }
}

use crate::coring::{cry_raw_size, cry_two_dex, BaseMatter, Matter};
use crate::errors::{Error, Result};

/// Seqner is sequence number material.
///
/// Provides a fully qualified format for sequence numbers when used as
/// attached cryptographic material items. Uses the 128 bit Salt_128 code
/// with the number as a big endian raw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seqner {
    base: BaseMatter,
}

impl Seqner {
    /// Creates a Seqner from a sequence number
    pub fn new(sn: u64) -> Result<Self> {
        let rs = cry_raw_size(cry_two_dex::SALT_128)?;
        let mut raw = vec![0u8; rs - 8];
        raw.extend_from_slice(&sn.to_be_bytes());
        let base = BaseMatter::new(&raw, cry_two_dex::SALT_128, 0)?;
        Ok(Self { base })
    }

    /// Creates a Seqner from a lowercase hex sequence number string
    pub fn from_snh(snh: &str) -> Result<Self> {
        let sn = u64::from_str_radix(snh, 16)
            .map_err(|e| Error::Validation(format!("Invalid hex sequence number = {}", e)))?;
        Self::new(sn)
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
        if base.code() != cry_two_dex::SALT_128 {
            return Err(Error::Validation(format!(
                "Invalid code = {} for Seqner",
                base.code()
            )));
        }
        Ok(Self { base })
    }

    /// Returns the sequence number
    pub fn sn(&self) -> u64 {
        let raw = self.base.raw();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&raw[raw.len() - 8..]);
        u64::from_be_bytes(bytes)
    }

    /// Returns lowercase hex of the sequence number, no leading zeros
    pub fn snh(&self) -> String {
        format!("{:x}", self.sn())
    }
}

impl Matter for Seqner {
    fn code(&self) -> &str { self.base.code() }
    fn raw(&self) -> &[u8] { self.base.raw() }
    fn index(&self) -> u32 { self.base.index() }
    fn qb64(&self) -> String { self.base.qb64() }
    fn qb64b(&self) -> Vec<u8> { self.base.qb64b() }
    fn qb2(&self) -> Vec<u8> { self.base.qb2() }
    fn transferable(&self) -> bool { self.base.transferable() }
    fn digestive(&self) -> bool { self.base.digestive() }
}

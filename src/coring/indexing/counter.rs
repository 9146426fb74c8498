use crate::coring::indexing::{sig_cnt_dex, SigMat};
use crate::errors::{Error, Result};

/// SigCounter is indexed signature count material.
///
/// Provides the count of following attached signatures. Useful when parsing
/// attached signatures from a stream where the counter qb64 is inserted
/// after the event and before the attached signatures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigCounter {
    sigmat: SigMat,
}

impl SigCounter {
    /// Creates a counter with default code for Base64 attached signatures
    pub fn new(count: u32) -> Result<Self> {
        Self::with_code(sig_cnt_dex::BASE64, count)
    }

    /// Creates a counter with explicit count code
    pub fn with_code(code: &str, count: u32) -> Result<Self> {
        // raw is forced empty, the count is the only payload
        let sigmat = SigMat::new(b"", code, count)?;
        Self::wrap(sigmat)
    }

    pub fn from_qb64(qb64: &str) -> Result<Self> {
        Self::wrap(SigMat::from_qb64(qb64)?)
    }

    pub fn from_qb64b(qb64b: &[u8]) -> Result<Self> {
        Self::wrap(SigMat::from_qb64b(qb64b)?)
    }

    pub fn from_qb2(qb2: &[u8]) -> Result<Self> {
        Self::wrap(SigMat::from_qb2(qb2)?)
    }

    fn wrap(sigmat: SigMat) -> Result<Self> {
        if !sig_cnt_dex::TUPLE.contains(&sigmat.code()) {
            return Err(Error::Validation(format!(
                "Invalid code = {} for SigCounter",
                sigmat.code()
            )));
        }
        Ok(Self { sigmat })
    }

    /// Returns count of attached signatures
    pub fn count(&self) -> u32 {
        self.sigmat.index()
    }

    pub fn code(&self) -> &str {
        self.sigmat.code()
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sig_counter() {
        let counter = SigCounter::new(1).unwrap();
        assert_eq!(counter.code(), "-A");
        assert_eq!(counter.count(), 1);
        assert_eq!(counter.qb64(), "-AAB");

        let counter = SigCounter::new(3).unwrap();
        assert_eq!(counter.qb64(), "-AAD");
        let counter2 = SigCounter::from_qb64("-AAD").unwrap();
        assert_eq!(counter2.count(), 3);
        assert_eq!(counter2, counter);

        let counter = SigCounter::with_code(sig_cnt_dex::BASE2, 2).unwrap();
        assert_eq!(counter.qb64(), "-BAC");
        assert_eq!(SigCounter::from_qb2(&counter.qb2()).unwrap().count(), 2);

        assert!(SigCounter::new(4096).is_err());
        // signature codes are not counters
        assert!(SigCounter::from_qb64(&format!("AA{}", "A".repeat(86))).is_err());
    }
}

use num_bigint::BigUint;

use crate::coring::diger::{DigAlgo, Diger};
use crate::coring::tholder::Tholder;
use crate::coring::{cry_one_dex, cry_raw_size, BaseMatter, Matter};
use crate::errors::{Error, Result};
use crate::serdering::ked::{Ked, KedValue};

/// Nexter is next key commitment material.
///
/// Binds the signing threshold and the digests of the future key list into
/// a single digest: the big endian integer of the digest of the limen
/// string XORed with the integer of each key digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nexter {
    base: BaseMatter,
}

impl Nexter {
    /// Creates a Nexter from a precomputed raw commitment
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
        if base.code() != cry_one_dex::BLAKE3_256 {
            return Err(Error::Validation(format!(
                "Unsupported code = {} for nexter",
                base.code()
            )));
        }
        Ok(Self { base })
    }

    /// Derives a Nexter from qb64 digests of the future public keys. The
    /// threshold defaults to a simple majority of the digest count.
    pub fn from_digs(digs: &[&str], tholder: Option<&Tholder>) -> Result<Self> {
        let raw = Self::derive_digs(digs, tholder)?;
        Self::new(&raw, cry_one_dex::BLAKE3_256)
    }

    /// Derives a Nexter from qb64 future public keys, digesting each. The
    /// threshold defaults to a simple majority of the key count.
    pub fn from_keys(keys: &[&str], tholder: Option<&Tholder>) -> Result<Self> {
        let raw = Self::derive_keys(keys, tholder)?;
        Self::new(&raw, cry_one_dex::BLAKE3_256)
    }

    /// Derives a Nexter from a key event dict, taking the keys from k and
    /// the threshold from kt when present
    pub fn from_ked(ked: &Ked) -> Result<Self> {
        let raw = Self::derive_ked(ked)?;
        Self::new(&raw, cry_one_dex::BLAKE3_256)
    }

    /// Returns true if the commitment derived from digs matches .raw
    pub fn verify_digs(&self, digs: &[&str], tholder: Option<&Tholder>) -> bool {
        match Self::derive_digs(digs, tholder) {
            Ok(raw) => raw == self.base.raw(),
            Err(_) => false,
        }
    }

    /// Returns true if the commitment derived from keys matches .raw
    pub fn verify_keys(&self, keys: &[&str], tholder: Option<&Tholder>) -> bool {
        match Self::derive_keys(keys, tholder) {
            Ok(raw) => raw == self.base.raw(),
            Err(_) => false,
        }
    }

    /// Returns true if the commitment derived from ked matches .raw
    pub fn verify_ked(&self, ked: &Ked) -> bool {
        match Self::derive_ked(ked) {
            Ok(raw) => raw == self.base.raw(),
            Err(_) => false,
        }
    }

    fn derive_digs(digs: &[&str], tholder: Option<&Tholder>) -> Result<Vec<u8>> {
        let mut keydigs = Vec::with_capacity(digs.len());
        for dig in digs {
            let diger = Diger::from_qb64(dig)
                .map_err(|e| Error::Derivation(format!("Error extracting digest = {}", e)))?;
            if diger.code() != cry_one_dex::BLAKE3_256 {
                return Err(Error::Derivation(format!(
                    "Mismatch of public key digest code = {} for next digest code = {}",
                    diger.code(),
                    cry_one_dex::BLAKE3_256
                )));
            }
            keydigs.push(diger.raw().to_vec());
        }

        let limen = Self::resolve_limen(tholder, keydigs.len())?;
        Self::compose(&limen, &keydigs)
    }

    fn derive_keys(keys: &[&str], tholder: Option<&Tholder>) -> Result<Vec<u8>> {
        if keys.is_empty() {
            return Err(Error::Derivation("Empty keys.".to_string()));
        }

        let keydigs: Vec<Vec<u8>> = keys
            .iter()
            .map(|key| DigAlgo::Blake3_256.digest(key.as_bytes()))
            .collect();

        let limen = Self::resolve_limen(tholder, keydigs.len())?;
        Self::compose(&limen, &keydigs)
    }

    fn derive_ked(ked: &Ked) -> Result<Vec<u8>> {
        let keys = ked
            .get("k")
            .and_then(KedValue::as_array)
            .ok_or_else(|| Error::Derivation("Error extracting keys from ked".to_string()))?;
        let keys: Vec<&str> = keys.iter().filter_map(KedValue::as_str).collect();
        if keys.is_empty() {
            return Err(Error::Derivation("Empty keys.".to_string()));
        }

        let tholder = match ked.get("kt") {
            Some(kt) => Some(
                Tholder::from_value(kt)
                    .map_err(|e| Error::Derivation(format!("Error extracting kt = {}", e)))?,
            ),
            None => None,
        };

        let keydigs: Vec<Vec<u8>> = keys
            .iter()
            .map(|key| DigAlgo::Blake3_256.digest(key.as_bytes()))
            .collect();

        let limen = Self::resolve_limen(tholder.as_ref(), keydigs.len())?;
        Self::compose(&limen, &keydigs)
    }

    /// Returns the limen of the given tholder, else the default simple
    /// majority threshold for count keys
    fn resolve_limen(tholder: Option<&Tholder>, count: usize) -> Result<String> {
        match tholder {
            Some(tholder) => Ok(tholder.limen().to_string()),
            None => {
                let sith = format!("{:x}", std::cmp::max(1, count.div_ceil(2)));
                Ok(Tholder::from_sith(&sith)?.limen().to_string())
            }
        }
    }

    /// XORs the limen digest with each key digest, big endian
    fn compose(limen: &str, keydigs: &[Vec<u8>]) -> Result<Vec<u8>> {
        let mut sint = BigUint::from_bytes_be(&DigAlgo::Blake3_256.digest(limen.as_bytes()));
        for keydig in keydigs {
            sint ^= BigUint::from_bytes_be(keydig);
        }

        let rs = cry_raw_size(cry_one_dex::BLAKE3_256)?;
        let bytes = sint.to_bytes_be();
        if bytes.len() > rs {
            return Err(Error::Derivation("Oversized commitment raw".to_string()));
        }
        let mut raw = vec![0u8; rs - bytes.len()];
        raw.extend_from_slice(&bytes);
        Ok(raw)
    }
}

impl Matter for Nexter {
    fn code(&self) -> &str { self.base.code() }
    fn raw(&self) -> &[u8] { self.base.raw() }
    fn index(&self) -> u32 { self.base.index() }
    fn qb64(&self) -> String { self.base.qb64() }
    fn qb64b(&self) -> Vec<u8> { self.base.qb64b() }
    fn qb2(&self) -> Vec<u8> { self.base.qb2() }
    fn transferable(&self) -> bool { self.base.transferable() }
    fn digestive(&self) -> bool { self.base.digestive() }
}

//! Key event serialization and deserialization
//!
//! A Serder frames one key event: serialized bytes anchored by a 17 byte
//! version string within the first 24 bytes, and the ordered key event dict
//! they encode. Serialization patches the size field of the version string
//! in place so the byte length never changes.

pub mod ked;

use tracing::debug;

use crate::coring::diger::Diger;
use crate::coring::verfer::Verfer;
use crate::coring::{cry_one_dex, Matter};
use crate::errors::{Error, Result};
use crate::serdering::ked::{dumps, loads, Ked, KedValue};
use crate::versioning::{deversify, versify, Kinds, Versionage, MIN_SNIFF_SIZE, REVER, VERSION};

/// Serder is the KERI key event serializer-deserializer.
///
/// Only supports the current protocol version. .raw and .ked are two views
/// of the same event and are kept consistent with .kind, .size and .diger.
#[derive(Debug, Clone)]
pub struct Serder {
    raw: Vec<u8>,
    ked: Ked,
    kind: Kinds,
    version: Versionage,
    size: usize,
    diger: Diger,
}

impl Serder {
    /// Deserializes a Serder from raw bytes, consuming size bytes from the
    /// head of the buffer
    pub fn from_raw(raw: &[u8]) -> Result<Self> {
        let (ked, kind, version, size) = Self::inhale(raw)?;
        let raw = raw[..size].to_vec();
        let diger = Diger::from_ser(&raw, cry_one_dex::BLAKE3_256)?;
        Ok(Self {
            raw,
            ked,
            kind,
            version,
            size,
            diger,
        })
    }

    /// Serializes a Serder from a key event dict. When kind is given it
    /// overrides the kind in the dict's version string. The caller's ked is
    /// defensively copied, never mutated.
    pub fn from_ked(ked: &Ked, kind: Option<Kinds>) -> Result<Self> {
        let (raw, kind, ked, version) = Self::exhale(ked, kind)?;
        let size = raw.len();
        let diger = Diger::from_ser(&raw, cry_one_dex::BLAKE3_256)?;
        Ok(Self {
            raw,
            ked,
            kind,
            version,
            size,
            diger,
        })
    }

    /// Returns serialization kind, version and size from the version string
    /// in the leading bytes of raw
    fn sniff(raw: &[u8]) -> Result<(Kinds, Versionage, usize)> {
        if raw.len() < MIN_SNIFF_SIZE {
            return Err(Error::Shortage("Need more bytes.".to_string()));
        }

        let whole = REVER
            .find(raw)
            .ok_or_else(|| Error::Validation("Invalid version string in raw".to_string()))?;
        if whole.start() > 12 {
            return Err(Error::Validation(
                "Invalid version string in raw, not at head".to_string(),
            ));
        }

        let vs = std::str::from_utf8(whole.as_bytes())
            .map_err(|e| Error::Validation(format!("Invalid version string = {}", e)))?;
        deversify(vs)
    }

    /// Parses serialized event raw and returns (ked, kind, version, size)
    fn inhale(raw: &[u8]) -> Result<(Ked, Kinds, Versionage, usize)> {
        let (kind, version, size) = Self::sniff(raw)?;
        if version != VERSION {
            return Err(Error::Version(format!(
                "Unsupported version = {}.{}",
                version.major, version.minor
            )));
        }

        if raw.len() < size {
            return Err(Error::Shortage("Need more bytes.".to_string()));
        }

        debug!(kind = kind.as_str(), size, "inhaling key event");
        let ked = loads(&raw[..size], kind)?;
        Ok((ked, kind, version, size))
    }

    /// Serializes ked and returns (raw, kind, ked, version) where ked holds
    /// the regenerated version string
    fn exhale(ked: &Ked, kind: Option<Kinds>) -> Result<(Vec<u8>, Kinds, Ked, Versionage)> {
        let vs = ked
            .get("v")
            .and_then(KedValue::as_str)
            .ok_or_else(|| {
                Error::Validation("Missing or empty version string in key event dict".to_string())
            })?;

        let (knd, version, _size) = deversify(vs)?;
        if version != VERSION {
            return Err(Error::Version(format!(
                "Unsupported version = {}.{}",
                version.major, version.minor
            )));
        }

        let kind = kind.unwrap_or(knd);
        let mut ked = ked.clone();

        let raw = dumps(&ked, kind)?;
        let size = raw.len();

        let whole = REVER
            .find(&raw)
            .ok_or_else(|| Error::Validation("Invalid version string in raw".to_string()))?;
        if whole.start() > 12 {
            return Err(Error::Validation(
                "Invalid version string in raw, not at head".to_string(),
            ));
        }

        // patch in the version string carrying the real size, length unchanged
        let vs = versify(Some(version), kind, size);
        let mut patched = Vec::with_capacity(size);
        patched.extend_from_slice(&raw[..whole.start()]);
        patched.extend_from_slice(vs.as_bytes());
        patched.extend_from_slice(&raw[whole.end()..]);
        if patched.len() != size {
            return Err(Error::Validation(format!(
                "Malformed version string size = {}",
                vs
            )));
        }

        ked.insert("v".to_string(), KedValue::from(vs));
        Ok((patched, kind, ked, version))
    }

    /// Replaces raw, recomputing ked, kind, version, size and diger as one
    /// atomic replacement
    pub fn set_raw(&mut self, raw: &[u8]) -> Result<()> {
        *self = Self::from_raw(raw)?;
        Ok(())
    }

    /// Replaces ked, recomputing raw and all dependent state, keeping kind
    pub fn set_ked(&mut self, ked: &Ked) -> Result<()> {
        *self = Self::from_ked(ked, Some(self.kind))?;
        Ok(())
    }

    /// Re-serializes to a different kind, recomputing all dependent state
    pub fn set_kind(&mut self, kind: Kinds) -> Result<()> {
        let ked = self.ked.clone();
        *self = Self::from_ked(&ked, Some(kind))?;
        Ok(())
    }

    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    pub fn ked(&self) -> &Ked {
        &self.ked
    }

    pub fn kind(&self) -> Kinds {
        self.kind
    }

    pub fn version(&self) -> Versionage {
        self.version
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the Diger of the digest of .raw
    pub fn diger(&self) -> &Diger {
        &self.diger
    }

    /// Returns qualified Base64 digest of .raw
    pub fn dig(&self) -> String {
        self.diger.qb64()
    }

    /// Returns qualified Base64 digest of .raw as bytes
    pub fn digb(&self) -> Vec<u8> {
        self.diger.qb64b()
    }

    /// Returns true if dig matches this event's digest, or if both are
    /// valid digests of .raw under their own algorithms
    pub fn compare(&self, dig: &[u8]) -> bool {
        self.diger.compare_dig(&self.raw, dig)
    }

    /// Returns Verfers converted from the event key list, empty for
    /// non-establishment events
    pub fn verfers(&self) -> Result<Vec<Verfer>> {
        let keys = match self.ked.get("k") {
            Some(value) => value.as_array().ok_or_else(|| {
                Error::Validation("Event key list is not a list".to_string())
            })?,
            None => return Ok(Vec::new()),
        };

        keys.iter()
            .map(|key| {
                key.as_str()
                    .ok_or_else(|| Error::Validation("Event key is not a string".to_string()))
                    .and_then(Verfer::from_qb64)
            })
            .collect()
    }

    /// Returns the sequence number from the hex s field
    pub fn sn(&self) -> Result<u64> {
        let snh = self
            .ked
            .get("s")
            .and_then(KedValue::as_str)
            .ok_or_else(|| Error::Validation("Missing sequence number".to_string()))?;
        u64::from_str_radix(snh, 16)
            .map_err(|e| Error::Validation(format!("Invalid sequence number = {}", e)))
    }

    /// Returns qb64 identifier prefix from the i field
    pub fn pre(&self) -> Result<String> {
        self.ked
            .get("i")
            .and_then(KedValue::as_str)
            .map(str::to_string)
            .ok_or_else(|| Error::Validation("Missing identifier prefix".to_string()))
    }

    /// Returns qb64b identifier prefix from the i field
    pub fn preb(&self) -> Result<Vec<u8>> {
        self.pre().map(String::into_bytes)
    }
}

//! Version string handling for KERI key event serializations
//!
//! The version string is a fixed 17 byte ASCII tag of the form
//! `KERI{major:x}{minor:x}{KIND}{size:06x}_` that anchors every serialized
//! key event and carries the serialization kind and total size.

use once_cell::sync::Lazy;
use regex::bytes::Regex;

use crate::errors::{Error, Result};

/// Protocol version as (major, minor)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Versionage {
    pub major: u8,
    pub minor: u8,
}

/// Current supported protocol version
pub const VERSION: Versionage = Versionage { major: 1, minor: 0 };

/// Number of characters in a full version string
pub const VER_FULL_SIZE: usize = 17;

/// Number of hex characters in the raw serialization size field
pub const VER_RAW_SIZE: usize = 6;

/// Minimum bytes in buffer needed to sniff a version string, else shortage
pub const MIN_SNIFF_SIZE: usize = 12 + VER_FULL_SIZE;

/// Version string extraction regex, over bytes
pub static REVER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"KERI(?P<major>[0-9a-f])(?P<minor>[0-9a-f])(?P<kind>[A-Z]{4})(?P<size>[0-9a-f]{6})_")
        .expect("invalid version string regex")
});

/// Serialization kinds for key events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kinds {
    Json,
    Mgpk,
    Cbor,
}

impl Kinds {
    /// Returns the four character kind tag used in version strings
    pub fn as_str(&self) -> &'static str {
        match self {
            Kinds::Json => "JSON",
            Kinds::Mgpk => "MGPK",
            Kinds::Cbor => "CBOR",
        }
    }

    /// Parses a four character kind tag
    pub fn from_str(kind: &str) -> Result<Self> {
        match kind {
            "JSON" => Ok(Kinds::Json),
            "MGPK" => Ok(Kinds::Mgpk),
            "CBOR" => Ok(Kinds::Cbor),
            _ => Err(Error::Validation(format!(
                "Invalid serialization kind = {}",
                kind
            ))),
        }
    }
}

/// MIME types for the serialization kinds
#[allow(dead_code)]
pub mod mimes {
    pub const JSON: &str = "application/keri+json";
    pub const MGPK: &str = "application/keri+msgpack";
    pub const CBOR: &str = "application/keri+cbor";
}

/// Event ilks (types of key event)
#[allow(dead_code)]
pub mod ilk_dex {
    /// Inception
    pub const ICP: &str = "icp";
    /// Rotation
    pub const ROT: &str = "rot";
    /// Interaction
    pub const IXN: &str = "ixn";
    /// Delegated inception
    pub const DIP: &str = "dip";
    /// Delegated rotation
    pub const DRT: &str = "drt";
    /// Receipt
    pub const RCT: &str = "rct";
    /// Validator receipt
    pub const VRC: &str = "vrc";
}

/// Returns version string for version, kind and size
pub fn versify(version: Option<Versionage>, kind: Kinds, size: usize) -> String {
    let version = version.unwrap_or(VERSION);
    format!(
        "KERI{:x}{:x}{}{:0width$x}_",
        version.major,
        version.minor,
        kind.as_str(),
        size,
        width = VER_RAW_SIZE
    )
}

fn group<'c>(caps: &'c regex::bytes::Captures, name: &str) -> Result<&'c str> {
    std::str::from_utf8(&caps[name])
        .map_err(|e| Error::Validation(format!("Invalid version string = {}", e)))
}

/// Returns tuple (kind, version, size) extracted from version string vs
pub fn deversify(vs: &str) -> Result<(Kinds, Versionage, usize)> {
    let caps = REVER
        .captures(vs.as_bytes())
        .ok_or_else(|| Error::Validation(format!("Invalid version string = {}", vs)))?;

    // capture groups are single hex digits and fixed width hex, always ascii
    let major = u8::from_str_radix(group(&caps, "major")?, 16)
        .map_err(|e| Error::Validation(format!("Invalid version major = {}", e)))?;
    let minor = u8::from_str_radix(group(&caps, "minor")?, 16)
        .map_err(|e| Error::Validation(format!("Invalid version minor = {}", e)))?;
    let kind = Kinds::from_str(group(&caps, "kind")?)?;
    let size = usize::from_str_radix(group(&caps, "size")?, 16)
        .map_err(|e| Error::Validation(format!("Invalid version size = {}", e)))?;

    Ok((kind, Versionage { major, minor }, size))
}

//! Indexed signature material coding
//!
//! Attached signatures carry an index into the current signing key list as
//! trailing Base64 characters of the code. These tables are disjoint from
//! the cryptographic material tables; the same leading characters select
//! different codes here.

pub mod counter;
pub mod siger;

use base64::{engine::general_purpose::URL_SAFE, engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::coring::{b64_to_int, int_to_b64, B64_IDX_BY_CHR};
use crate::errors::{Error, Result};

/// Selector characters for attached signature material
pub mod sig_sel_dex {
    /// Use four character table
    pub const FOUR: char = '0';
    /// Use signature count table
    pub const DASH: char = '-';
}

/// Count codes for the number of attached signatures following an event
///
/// First two code characters select the format of attached signatures, the
/// next two characters carry the count. raw is empty.
#[allow(dead_code)]
pub mod sig_cnt_dex {
    /// Fully qualified Base64 format signatures
    pub const BASE64: &str = "-A";
    /// Fully qualified Base2 format signatures
    pub const BASE2: &str = "-B";

    pub static TUPLE: [&str; 2] = [BASE64, BASE2];
}

/// Two character indexed signature codes, one char cipher suite plus one
/// char index into the current signing key list
#[allow(dead_code)]
pub mod sig_two_dex {
    /// Ed25519 signature
    pub const ED25519: &str = "A";
    /// ECDSA secp256k1 signature
    pub const ECDSA_256K1: &str = "B";

    pub static TUPLE: [&str; 2] = [ED25519, ECDSA_256K1];
}

/// Four character indexed signature codes, two char cipher suite plus two
/// char index
#[allow(dead_code)]
pub mod sig_four_dex {
    /// Ed448 signature
    pub const ED448: &str = "0A";

    pub static TUPLE: [&str; 1] = [ED448];
}

/// Maximum index value given one Base64 digit
pub const SIG_TWO_MAX: u32 = 63;

/// Maximum index value given two Base64 digits
pub const SIG_FOUR_MAX: u32 = 4095;

/// Maximum count value given two Base64 digits
pub const SIG_CNT_MAX: u32 = 4095;

/// Mapping of code to total qb64 size including code and index
pub static SIG_SIZES: Lazy<HashMap<&'static str, usize>> = Lazy::new(|| {
    let mut sizes = HashMap::new();
    sizes.insert("-A", 4);
    sizes.insert("-B", 4);
    sizes.insert("A", 88);
    sizes.insert("B", 88);
    sizes.insert("0A", 156);
    sizes
});

/// Mapping of code to size of raw signature in bytes
pub static SIG_RAW_SIZES: Lazy<HashMap<&'static str, usize>> = Lazy::new(|| {
    let mut sizes = HashMap::new();
    sizes.insert("-A", 0);
    sizes.insert("-B", 0);
    sizes.insert("A", 64);
    sizes.insert("B", 64);
    sizes.insert("0A", 114);
    sizes
});

/// Mapping of code to size of Base64 index portion of the code
pub static SIG_IDX_SIZES: Lazy<HashMap<&'static str, usize>> = Lazy::new(|| {
    let mut sizes = HashMap::new();
    sizes.insert("-A", 2);
    sizes.insert("-B", 2);
    sizes.insert("A", 1);
    sizes.insert("B", 1);
    sizes.insert("0A", 2);
    sizes
});

/// Minimum size of fully qualified signature material
pub static MIN_SIG_SIZE: Lazy<usize> = Lazy::new(|| *SIG_SIZES.values().min().unwrap());

fn sig_size(code: &str) -> Result<usize> {
    SIG_SIZES
        .get(code)
        .copied()
        .ok_or_else(|| Error::Validation(format!("Unsupported sig code = {}", code)))
}

fn max_index(code: &str) -> u32 {
    if sig_two_dex::TUPLE.contains(&code) {
        SIG_TWO_MAX
    } else {
        SIG_FOUR_MAX
    }
}

/// SigMat is fully qualified attached signature material.
///
/// .code is the cipher suite, .index the zero based offset into the signing
/// key list, or for count codes the count of attached signatures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigMat {
    code: String,
    raw: Vec<u8>,
    index: u32,
}

impl SigMat {
    /// Creates signature material from raw bytes, code and index.
    pub fn new(raw: &[u8], code: &str, index: u32) -> Result<Self> {
        let rs = *SIG_RAW_SIZES
            .get(code)
            .ok_or_else(|| Error::Validation(format!("Unsupported sig code = {}", code)))?;
        let is = SIG_IDX_SIZES[code];

        let kept = &raw[..raw.len().min(rs)];
        let m = kept.len() % 3;
        let pad = if m > 0 { 3 - m } else { 0 };
        if (code.len() + is) % 4 != pad {
            return Err(Error::Validation(format!(
                "Wrong code = {} for raw size = {}",
                code,
                raw.len()
            )));
        }

        if index > max_index(code) {
            return Err(Error::Validation(format!(
                "Invalid index = {} for code = {}",
                index, code
            )));
        }

        if raw.len() < rs {
            return Err(Error::Validation(format!(
                "Unexpected raw size = {} for code = {} not size = {}",
                raw.len(),
                code,
                rs
            )));
        }

        Ok(Self {
            code: code.to_string(),
            raw: kept.to_vec(),
            index,
        })
    }

    pub fn from_qb64(qb64: &str) -> Result<Self> {
        Self::exfil(qb64.as_bytes())
    }

    pub fn from_qb64b(qb64b: &[u8]) -> Result<Self> {
        Self::exfil(qb64b)
    }

    pub fn from_qb2(qb2: &[u8]) -> Result<Self> {
        Self::exfil(URL_SAFE_NO_PAD.encode(qb2).as_bytes())
    }

    /// Returns fully qualified Base64 bytes from code, index and raw
    fn infil(&self) -> Vec<u8> {
        let is = SIG_IDX_SIZES[self.code.as_str()];
        let full = format!("{}{}", self.code, int_to_b64(self.index as usize, is));

        let mut out = full.into_bytes();
        out.extend_from_slice(URL_SAFE_NO_PAD.encode(&self.raw).as_bytes());
        out
    }

    /// Extracts code, index and raw from qualified Base64 bytes
    fn exfil(qb64b: &[u8]) -> Result<Self> {
        if qb64b.len() < *MIN_SIG_SIZE {
            return Err(Error::Shortage("Need more bytes.".to_string()));
        }

        let first = qb64b[0] as char;
        let mut cs = 1;
        let one = first.to_string();

        let (code, index) = if sig_two_dex::TUPLE.contains(&one.as_str()) {
            // 2 chars total, 1 code + 1 index
            let idx_chr = qb64b[1] as char;
            let index = *B64_IDX_BY_CHR.get(&idx_chr).ok_or_else(|| {
                Error::Validation(format!("Invalid index character = {}", idx_chr))
            })? as u32;
            cs += 1;
            (one, index)
        } else if first == sig_sel_dex::FOUR {
            cs += 1;
            let code = String::from_utf8_lossy(&qb64b[..cs]).to_string();
            if !sig_four_dex::TUPLE.contains(&code.as_str()) {
                return Err(Error::Validation(format!(
                    "Invalid derivation code = {}",
                    code
                )));
            }
            let idx = String::from_utf8_lossy(&qb64b[cs..cs + 2]).to_string();
            cs += 2;
            (code, b64_to_int(&idx)? as u32)
        } else if first == sig_sel_dex::DASH {
            cs += 1;
            let code = String::from_utf8_lossy(&qb64b[..cs]).to_string();
            if !sig_cnt_dex::TUPLE.contains(&code.as_str()) {
                return Err(Error::Validation(format!(
                    "Invalid derivation code = {}",
                    code
                )));
            }
            let idx = String::from_utf8_lossy(&qb64b[cs..cs + 2]).to_string();
            cs += 2;
            (code, b64_to_int(&idx)? as u32)
        } else {
            return Err(Error::Validation(format!(
                "Improperly coded material, start char = {}",
                first
            )));
        };

        let fs = sig_size(&code)?;
        if qb64b.len() < fs {
            return Err(Error::Shortage("Need more bytes.".to_string()));
        }
        let qb64b = &qb64b[..fs];

        let pad = cs % 4;
        let mut base = qb64b[cs..].to_vec();
        base.extend(std::iter::repeat(b'=').take(pad));
        let raw = URL_SAFE
            .decode(&base)
            .map_err(|e| Error::Validation(format!("Improperly qualified material = {}", e)))?;

        if raw.len() != (fs - cs) * 3 / 4 {
            return Err(Error::Validation(
                "Improperly qualified material, bad raw length".to_string(),
            ));
        }

        Ok(Self { code, raw, index })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn qb64(&self) -> String {
        String::from_utf8(self.infil()).unwrap_or_default()
    }

    pub fn qb64b(&self) -> Vec<u8> {
        self.infil()
    }

    pub fn qb2(&self) -> Vec<u8> {
        URL_SAFE_NO_PAD.decode(self.infil()).unwrap_or_default()
    }
}

//! Core cryptographic material coding
//!
//! This module provides the code tables and the base translator between the
//! three fully qualified representations of cryptographic material:
//! qb64 (Base64URL string), qb64b (Base64URL bytes) and qb2 (packed binary).

pub mod cigar;
pub mod counter;
pub mod diger;
pub mod indexing;
pub mod nexter;
pub mod prefixer;
pub mod seqner;
pub mod signing;
pub mod tholder;
pub mod verfer;

use base64::{engine::general_purpose::URL_SAFE, engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::errors::{Error, Result};

/// Maps Base64URL index to corresponding character
pub static B64_CHR_BY_IDX: Lazy<HashMap<u8, char>> = Lazy::new(|| {
    let mut map = HashMap::new();

    // A-Z: indices 0-25
    for (idx, c) in (b'A'..=b'Z').enumerate() {
        map.insert(idx as u8, c as char);
    }

    // a-z: indices 26-51
    for (idx, c) in (b'a'..=b'z').enumerate() {
        map.insert((idx + 26) as u8, c as char);
    }

    // 0-9: indices 52-61
    for (idx, c) in (b'0'..=b'9').enumerate() {
        map.insert((idx + 52) as u8, c as char);
    }

    map.insert(62, '-');
    map.insert(63, '_');

    map
});

/// Maps Base64URL character to corresponding index
pub static B64_IDX_BY_CHR: Lazy<HashMap<char, u8>> = Lazy::new(|| {
    B64_CHR_BY_IDX.iter().map(|(&idx, &c)| (c, idx)).collect()
});

/// Returns conversion of unsigned int i to Base64 str
///
/// l is the minimum number of b64 digits, left padded with "A" (zero).
/// Widens past l when i needs more digits, never truncates.
pub fn int_to_b64(i: usize, l: usize) -> String {
    let mut d = Vec::new();
    let mut i = i;
    d.insert(0, B64_CHR_BY_IDX[&((i % 64) as u8)]);
    i /= 64;
    while i > 0 {
        d.insert(0, B64_CHR_BY_IDX[&((i % 64) as u8)]);
        i /= 64;
    }
    while d.len() < l {
        d.insert(0, 'A');
    }
    d.into_iter().collect()
}

/// Returns conversion of Base64 str cs to unsigned int
pub fn b64_to_int(cs: &str) -> Result<usize> {
    let mut i: usize = 0;
    for c in cs.chars() {
        let idx = B64_IDX_BY_CHR
            .get(&c)
            .ok_or_else(|| Error::Validation(format!("Invalid Base64 character = {}", c)))?;
        i = i * 64 + *idx as usize;
    }
    Ok(i)
}

/// Selector characters for cryptographic material code tables
///
/// The first character of qualified material uniquely selects the table
/// to consult.
pub mod cry_sel_dex {
    /// Use two character table
    pub const TWO: char = '0';
    /// Use four character table
    pub const FOUR: char = '1';
    /// Use count table
    pub const DASH: char = '-';
}

/// Count codes that indicate the number of attached material items following
///
/// First two code characters select the format of the attached items, the
/// next two characters are the Base64 encoded count. raw is empty.
#[allow(dead_code)]
pub mod cry_cnt_dex {
    /// Fully qualified Base64 format receipt couplets
    pub const BASE64: &str = "-A";
    /// Fully qualified Base2 format receipt couplets
    pub const BASE2: &str = "-B";

    pub static TUPLE: [&str; 2] = [BASE64, BASE2];
}

/// Maximum count value given two Base64 digits
pub const CRY_CNT_MAX: u32 = 4095;

/// One character derivation codes
///
/// Binary length of everything here results in 1 Base64 pad byte.
#[allow(dead_code)]
pub mod cry_one_dex {
    /// Ed25519 256 bit random seed for private key
    pub const ED25519_SEED: &str = "A";
    /// Ed25519 verification key non-transferable, basic derivation
    pub const ED25519N: &str = "B";
    /// X25519 public encryption key, converted from Ed25519
    pub const X25519: &str = "C";
    /// Ed25519 verification key basic derivation
    pub const ED25519: &str = "D";
    /// Blake3 256 bit digest self-addressing derivation
    pub const BLAKE3_256: &str = "E";
    /// Blake2b 256 bit digest self-addressing derivation
    pub const BLAKE2B_256: &str = "F";
    /// Blake2s 256 bit digest self-addressing derivation
    pub const BLAKE2S_256: &str = "G";
    /// SHA3 256 bit digest self-addressing derivation
    pub const SHA3_256: &str = "H";
    /// SHA2 256 bit digest self-addressing derivation
    pub const SHA2_256: &str = "I";
    /// ECDSA secp256k1 256 bit random seed for private key
    pub const ECDSA_256K1_SEED: &str = "J";
    /// Ed448 448 bit random seed for private key
    pub const ED448_SEED: &str = "K";
    /// X448 public encryption key, converted from Ed448
    pub const X448: &str = "L";

    pub static TUPLE: [&str; 12] = [
        ED25519_SEED,
        ED25519N,
        X25519,
        ED25519,
        BLAKE3_256,
        BLAKE2B_256,
        BLAKE2S_256,
        SHA3_256,
        SHA2_256,
        ECDSA_256K1_SEED,
        ED448_SEED,
        X448,
    ];
}

/// Two character derivation codes
///
/// Binary length of everything here results in 2 Base64 pad bytes.
#[allow(dead_code)]
pub mod cry_two_dex {
    /// 128 bit random salt or seed
    pub const SALT_128: &str = "0A";
    /// Ed25519 signature
    pub const ED25519_SIG: &str = "0B";
    /// ECDSA secp256k1 signature
    pub const ECDSA_256K1_SIG: &str = "0C";

    pub static TUPLE: [&str; 3] = [SALT_128, ED25519_SIG, ECDSA_256K1_SIG];
}

/// Four character derivation codes
///
/// Binary length of everything here results in 0 Base64 pad bytes.
#[allow(dead_code)]
pub mod cry_four_dex {
    /// ECDSA secp256k1 verification key non-transferable, basic derivation
    pub const ECDSA_256K1N: &str = "1AAA";
    /// ECDSA secp256k1 verification key, basic derivation
    pub const ECDSA_256K1: &str = "1AAB";
    /// Ed448 non-transferable prefix public signing verification key
    pub const ED448N: &str = "1AAC";
    /// Ed448 public signing verification key
    pub const ED448: &str = "1AAD";
    /// Ed448 signature, self-signing derivation
    pub const ED448_SIG: &str = "1AAE";

    pub static TUPLE: [&str; 5] = [ECDSA_256K1N, ECDSA_256K1, ED448N, ED448, ED448_SIG];
}

/// All non-transferable derivation codes
pub mod cry_non_trans_dex {
    use super::{cry_four_dex, cry_one_dex};

    pub static TUPLE: [&str; 3] = [
        cry_one_dex::ED25519N,
        cry_four_dex::ECDSA_256K1N,
        cry_four_dex::ED448N,
    ];
}

/// All digest derivation codes
///
/// Needed to ensure delegated inception uses a self-addressing derivation.
pub mod cry_dig_dex {
    use super::cry_one_dex;

    pub static TUPLE: [&str; 5] = [
        cry_one_dex::BLAKE3_256,
        cry_one_dex::BLAKE2B_256,
        cry_one_dex::BLAKE2S_256,
        cry_one_dex::SHA3_256,
        cry_one_dex::SHA2_256,
    ];
}

/// Mapping of code to total qb64 size including the code itself
pub static CRY_SIZES: Lazy<HashMap<&'static str, usize>> = Lazy::new(|| {
    let mut sizes = HashMap::new();
    sizes.insert("-A", 4);
    sizes.insert("-B", 4);
    for code in ["A", "B", "C", "D", "E", "F", "G", "H", "I", "J"] {
        sizes.insert(code, 44);
    }
    sizes.insert("K", 76);
    sizes.insert("L", 76);
    sizes.insert("0A", 24);
    sizes.insert("0B", 88);
    sizes.insert("0C", 88);
    sizes.insert("1AAA", 48);
    sizes.insert("1AAB", 48);
    sizes.insert("1AAC", 80);
    sizes.insert("1AAD", 80);
    sizes.insert("1AAE", 156);
    sizes
});

/// Mapping of code to size of raw unqualified material in bytes
pub static CRY_RAW_SIZES: Lazy<HashMap<&'static str, usize>> = Lazy::new(|| {
    let mut sizes = HashMap::new();
    sizes.insert("-A", 0);
    sizes.insert("-B", 0);
    for code in ["A", "B", "C", "D", "E", "F", "G", "H", "I", "J"] {
        sizes.insert(code, 32);
    }
    sizes.insert("K", 56);
    sizes.insert("L", 56);
    sizes.insert("0A", 16);
    sizes.insert("0B", 64);
    sizes.insert("0C", 64);
    sizes.insert("1AAA", 33);
    sizes.insert("1AAB", 33);
    sizes.insert("1AAC", 57);
    sizes.insert("1AAD", 57);
    sizes.insert("1AAE", 114);
    sizes
});

/// Mapping of code to size of Base64 index portion embedded in the code
pub static CRY_IDX_SIZES: Lazy<HashMap<&'static str, usize>> = Lazy::new(|| {
    let mut sizes = HashMap::new();
    sizes.insert("-A", 2);
    sizes.insert("-B", 2);
    sizes
});

/// Minimum size of fully qualified material, shortage threshold for exfil
pub static MIN_CRY_SIZE: Lazy<usize> = Lazy::new(|| *CRY_SIZES.values().min().unwrap());

/// Returns total qb64 size for code
pub fn cry_size(code: &str) -> Result<usize> {
    CRY_SIZES
        .get(code)
        .copied()
        .ok_or_else(|| Error::Validation(format!("Unsupported code = {}", code)))
}

/// Returns raw material size in bytes for code
pub fn cry_raw_size(code: &str) -> Result<usize> {
    CRY_RAW_SIZES
        .get(code)
        .copied()
        .ok_or_else(|| Error::Validation(format!("Unsupported code = {}", code)))
}

/// Returns embedded Base64 index size for code, zero when not a count code
pub fn cry_idx_size(code: &str) -> usize {
    CRY_IDX_SIZES.get(code).copied().unwrap_or(0)
}

/// Matter is a trait for fully qualified cryptographic material.
/// Implementations provide the specialized crypto material types.
pub trait Matter {
    /// Returns the derivation code
    fn code(&self) -> &str;

    /// Returns raw crypto material without derivation code
    fn raw(&self) -> &[u8];

    /// Returns count of attached material for count codes, zero otherwise
    fn index(&self) -> u32;

    /// Returns Base64 fully qualified representation
    fn qb64(&self) -> String;

    /// Returns Base64 fully qualified representation as bytes
    fn qb64b(&self) -> Vec<u8>;

    /// Returns binary fully qualified representation
    fn qb2(&self) -> Vec<u8>;

    /// Returns whether the derivation code is transferable
    fn transferable(&self) -> bool;

    /// Returns whether the derivation code is a digest
    fn digestive(&self) -> bool;
}

/// Common implementation for all Matter types
///
/// raw is immutable after construction. index is nonzero only for count
/// codes where it holds the attachment count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseMatter {
    code: String,
    raw: Vec<u8>,
    index: u32,
}

/// Returns number of pad characters that would result from converting raw
/// to Base64 encoding
fn b64_pad(raw: &[u8]) -> usize {
    let m = raw.len() % 3;
    if m > 0 {
        3 - m
    } else {
        0
    }
}

impl BaseMatter {
    /// Creates new material from raw bytes, derivation code and index.
    ///
    /// Validates that the code matches the Base64 pad count of raw. raw
    /// longer than the code's raw size is truncated, shorter is an error.
    pub fn new(raw: &[u8], code: &str, index: u32) -> Result<Self> {
        let rs = cry_raw_size(code)?;
        let is = cry_idx_size(code);
        let pad = b64_pad(&raw[..raw.len().min(rs)]);

        if (code.len() + is) % 4 != pad {
            return Err(Error::Validation(format!(
                "Wrong code = {} for raw size = {}",
                code,
                raw.len()
            )));
        }

        if is > 0 {
            if index > CRY_CNT_MAX {
                return Err(Error::Validation(format!(
                    "Invalid index = {} for code = {}",
                    index, code
                )));
            }
        } else if index != 0 {
            return Err(Error::Validation(format!(
                "Nonzero index = {} for code = {}",
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
            raw: raw[..rs].to_vec(),
            index,
        })
    }

    /// Creates material from fully qualified Base64 str
    pub fn from_qb64(qb64: &str) -> Result<Self> {
        Self::from_qb64b(qb64.as_bytes())
    }

    /// Creates material from fully qualified Base64 bytes
    pub fn from_qb64b(qb64b: &[u8]) -> Result<Self> {
        Self::exfil(qb64b)
    }

    /// Creates material from fully qualified binary bytes
    pub fn from_qb2(qb2: &[u8]) -> Result<Self> {
        Self::exfil(URL_SAFE_NO_PAD.encode(qb2).as_bytes())
    }

    /// Returns fully qualified Base64 bytes given code, index and raw
    fn infil(&self) -> Vec<u8> {
        let is = cry_idx_size(&self.code);
        let full = if is > 0 {
            format!("{}{}", self.code, int_to_b64(self.index as usize, is))
        } else {
            self.code.clone()
        };

        // pad invariant holds by construction, encoded raw carries no pad chars
        let mut out = full.into_bytes();
        out.extend_from_slice(URL_SAFE_NO_PAD.encode(&self.raw).as_bytes());
        out
    }

    /// Extracts code, index and raw from qualified Base64 bytes
    fn exfil(qb64b: &[u8]) -> Result<Self> {
        if qb64b.len() < *MIN_CRY_SIZE {
            return Err(Error::Shortage("Need more bytes.".to_string()));
        }

        let first = qb64b[0] as char;
        let mut cs = 1; // code size in chars consumed from the front
        let mut index = 0u32;

        let one = first.to_string();
        let code: String = if cry_one_dex::TUPLE.contains(&one.as_str()) {
            one
        } else if first == cry_sel_dex::TWO {
            cs += 1;
            let code = String::from_utf8_lossy(&qb64b[..cs]).to_string();
            if !cry_two_dex::TUPLE.contains(&code.as_str()) {
                return Err(Error::Validation(format!(
                    "Invalid derivation code = {}",
                    code
                )));
            }
            code
        } else if first == cry_sel_dex::FOUR {
            cs += 3;
            let code = String::from_utf8_lossy(&qb64b[..cs]).to_string();
            if !cry_four_dex::TUPLE.contains(&code.as_str()) {
                return Err(Error::Validation(format!(
                    "Invalid derivation code = {}",
                    code
                )));
            }
            code
        } else if first == cry_sel_dex::DASH {
            cs += 1;
            let code = String::from_utf8_lossy(&qb64b[..cs]).to_string();
            if !cry_cnt_dex::TUPLE.contains(&code.as_str()) {
                return Err(Error::Validation(format!(
                    "Invalid derivation code = {}",
                    code
                )));
            }
            // two more characters carry the count
            let idx = String::from_utf8_lossy(&qb64b[cs..cs + 2]).to_string();
            index = b64_to_int(&idx)? as u32;
            cs += 2;
            code
        } else {
            return Err(Error::Validation(format!(
                "Improperly coded material, start char = {}",
                first
            )));
        };

        let fs = cry_size(&code)?;
        if qb64b.len() < fs {
            return Err(Error::Shortage("Need more bytes.".to_string()));
        }
        let qb64b = &qb64b[..fs]; // strip off full material, ignore trailing stream

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

        Ok(Self {
            code,
            raw,
            index,
        })
    }
}

impl Matter for BaseMatter {
    fn code(&self) -> &str {
        &self.code
    }

    fn raw(&self) -> &[u8] {
        &self.raw
    }

    fn index(&self) -> u32 {
        self.index
    }

    fn qb64(&self) -> String {
        String::from_utf8(self.infil()).unwrap_or_default()
    }

    fn qb64b(&self) -> Vec<u8> {
        self.infil()
    }

    fn qb2(&self) -> Vec<u8> {
        URL_SAFE_NO_PAD.decode(self.infil()).unwrap_or_default()
    }

    fn transferable(&self) -> bool {
        !cry_non_trans_dex::TUPLE.contains(&self.code.as_str())
    }

    fn digestive(&self) -> bool {
        cry_dig_dex::TUPLE.contains(&self.code.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_b64_conversions() {
        assert_eq!(int_to_b64(0, 2), "AA");
        assert_eq!(int_to_b64(3, 2), "AD");
        assert_eq!(int_to_b64(63, 2), "A_");
        assert_eq!(int_to_b64(64, 2), "BA");
        assert_eq!(int_to_b64(4095, 2), "__");
        // widens past minimum length, never truncates
        assert_eq!(int_to_b64(65, 1), "BB");

        assert_eq!(b64_to_int("AA").unwrap(), 0);
        assert_eq!(b64_to_int("AD").unwrap(), 3);
        assert_eq!(b64_to_int("A_").unwrap(), 63);
        assert_eq!(b64_to_int("BA").unwrap(), 64);
        assert_eq!(b64_to_int("__").unwrap(), 4095);
        assert!(b64_to_int("=").is_err());
    }

    #[test]
    fn test_code_tables() {
        assert_eq!(cry_one_dex::ED25519_SEED, "A");
        assert_eq!(cry_one_dex::ED25519N, "B");
        assert_eq!(cry_one_dex::ED25519, "D");
        assert_eq!(cry_one_dex::BLAKE3_256, "E");
        assert_eq!(cry_two_dex::SALT_128, "0A");
        assert_eq!(cry_two_dex::ED25519_SIG, "0B");
        assert_eq!(cry_four_dex::ECDSA_256K1N, "1AAA");
        assert_eq!(cry_cnt_dex::BASE64, "-A");

        assert_eq!(cry_size("A").unwrap(), 44);
        assert_eq!(cry_raw_size("A").unwrap(), 32);
        assert_eq!(cry_size("K").unwrap(), 76);
        assert_eq!(cry_raw_size("K").unwrap(), 56);
        assert_eq!(cry_size("0A").unwrap(), 24);
        assert_eq!(cry_raw_size("0A").unwrap(), 16);
        assert_eq!(cry_size("0B").unwrap(), 88);
        assert_eq!(cry_raw_size("0B").unwrap(), 64);
        assert_eq!(cry_size("1AAE").unwrap(), 156);
        assert_eq!(cry_raw_size("1AAE").unwrap(), 114);
        assert_eq!(cry_size("-A").unwrap(), 4);
        assert_eq!(cry_raw_size("-A").unwrap(), 0);
        assert_eq!(cry_idx_size("-A"), 2);
        assert_eq!(cry_idx_size("A"), 0);
        assert!(cry_size("Z").is_err());

        assert_eq!(*MIN_CRY_SIZE, 4);

        // pad invariant: full size mod 4 equals pad of raw for every code
        for (code, fs) in CRY_SIZES.iter() {
            let rs = CRY_RAW_SIZES[code];
            let is = cry_idx_size(code);
            let pad = (3 - rs % 3) % 3;
            assert_eq!((code.len() + is) % 4, pad, "code = {}", code);
            assert_eq!((fs - code.len() - is) * 3 / 4, rs, "code = {}", code);
        }
    }

    #[test]
    fn test_matter_new() {
        // empty raw with non-count code
        assert!(BaseMatter::new(b"", "A", 0).is_err());

        let verkey: &[u8] = &[0u8; 32];
        let matter = BaseMatter::new(verkey, "A", 0).unwrap();
        assert_eq!(matter.code(), "A");
        assert_eq!(matter.raw(), verkey);
        assert_eq!(matter.index(), 0);
        assert_eq!(matter.qb64(), "A".repeat(44));

        // wrong code for pad of raw
        assert!(BaseMatter::new(&[0u8; 32], "0A", 0).is_err());
        assert!(BaseMatter::new(&[0u8; 16], "A", 0).is_err());

        // longer raw is truncated, shorter is rejected
        let long: Vec<u8> = (0u8..40).collect();
        let matter = BaseMatter::new(&long, "B", 0).unwrap();
        assert_eq!(matter.raw(), &long[..32]);
        assert!(BaseMatter::new(&long[..20], "B", 0).is_err());

        // nonzero index requires a count code
        assert!(BaseMatter::new(&[0u8; 32], "A", 1).is_err());
        assert!(BaseMatter::new(b"", "-A", 4096).is_err());
    }

    #[test]
    fn test_matter_roundtrip() {
        let raw: Vec<u8> = (0u8..32).collect();
        let matter = BaseMatter::new(&raw, "B", 0).unwrap();
        let qb64 = matter.qb64();
        assert_eq!(qb64.len(), 44);
        assert!(qb64.starts_with('B'));
        assert!(!matter.transferable());
        assert!(!matter.digestive());

        let matter2 = BaseMatter::from_qb64(&qb64).unwrap();
        assert_eq!(matter2, matter);

        let matter3 = BaseMatter::from_qb64b(&matter.qb64b()).unwrap();
        assert_eq!(matter3, matter);

        let qb2 = matter.qb2();
        assert_eq!(qb2.len(), 33);
        let matter4 = BaseMatter::from_qb2(&qb2).unwrap();
        assert_eq!(matter4, matter);

        // two char code
        let salt = BaseMatter::new(&[0u8; 16], "0A", 0).unwrap();
        assert_eq!(salt.qb64(), "0AAAAAAAAAAAAAAAAAAAAAAA");
        assert_eq!(BaseMatter::from_qb64(&salt.qb64()).unwrap(), salt);

        // four char code
        let key33: Vec<u8> = (0u8..33).collect();
        let k1 = BaseMatter::new(&key33, "1AAA", 0).unwrap();
        assert_eq!(k1.qb64().len(), 48);
        assert!(!k1.transferable());
        assert_eq!(BaseMatter::from_qb64(&k1.qb64()).unwrap(), k1);
        assert_eq!(BaseMatter::from_qb2(&k1.qb2()).unwrap(), k1);
    }

    #[test]
    fn test_matter_count_codes() {
        let cnt = BaseMatter::new(b"", "-A", 3).unwrap();
        assert_eq!(cnt.qb64(), "-AAD");
        assert_eq!(cnt.raw(), b"");
        assert_eq!(cnt.index(), 3);

        let cnt2 = BaseMatter::from_qb64("-AAD").unwrap();
        assert_eq!(cnt2.code(), "-A");
        assert_eq!(cnt2.index(), 3);
        assert_eq!(cnt2.raw(), b"");

        let max = BaseMatter::new(b"", "-A", 4095).unwrap();
        assert_eq!(max.qb64(), "-A__");
        assert_eq!(BaseMatter::from_qb64("-A__").unwrap().index(), 4095);
    }

    #[test]
    fn test_matter_from_stream() {
        // parsing truncates at the full size so trailing stream is ignored
        let raw: Vec<u8> = (0u8..32).collect();
        let matter = BaseMatter::new(&raw, "B", 0).unwrap();
        let both = format!("{}:mystuff/mypath/toresource?query=what#fragment", matter.qb64());
        let matter2 = BaseMatter::from_qb64(&both).unwrap();
        assert_eq!(matter2.qb64(), matter.qb64());
    }

    #[test]
    fn test_matter_shortage() {
        let raw: Vec<u8> = (0u8..32).collect();
        let qb64 = BaseMatter::new(&raw, "D", 0).unwrap().qb64();

        // below the minimum material size
        match BaseMatter::from_qb64(&qb64[..2]) {
            Err(Error::Shortage(_)) => {}
            other => panic!("expected shortage, got {:?}", other),
        }

        // enough for the code but not the full material
        match BaseMatter::from_qb64(&qb64[..10]) {
            Err(Error::Shortage(_)) => {}
            other => panic!("expected shortage, got {:?}", other),
        }

        // exactly the full size succeeds
        assert!(BaseMatter::from_qb64(&qb64).is_ok());
    }

    #[test]
    fn test_matter_invalid() {
        // unknown one char code
        assert!(matches!(
            BaseMatter::from_qb64(&"M".repeat(44)),
            Err(Error::Validation(_))
        ));
        // unknown two char code
        assert!(matches!(
            BaseMatter::from_qb64(&format!("0Z{}", "A".repeat(22))),
            Err(Error::Validation(_))
        ));
        // unknown four char code
        assert!(matches!(
            BaseMatter::from_qb64(&format!("1ZZZ{}", "A".repeat(44))),
            Err(Error::Validation(_))
        ));
        // unknown count code
        assert!(matches!(
            BaseMatter::from_qb64("-CAD"),
            Err(Error::Validation(_))
        ));
        // invalid selector
        assert!(matches!(
            BaseMatter::from_qb64(&"#".repeat(44)),
            Err(Error::Validation(_))
        ));
    }
}

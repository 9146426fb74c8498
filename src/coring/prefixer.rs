use crate::coring::cigar::Cigar;
use crate::coring::diger::DigAlgo;
use crate::coring::signing::Signer;
use crate::coring::verfer::Verfer;
use crate::coring::{cry_one_dex, cry_size, cry_two_dex, BaseMatter, Matter};
use crate::errors::{Error, Result};
use crate::serdering::ked::{Ked, KedValue};
use crate::serdering::Serder;
use crate::versioning::ilk_dex;

/// Dummy placeholder char for the prefix while deriving. Not a valid Base64
/// character so it can never collide with a real prefix.
const DUMMY: char = '#';

/// Prefixer is autonomic identifier prefix material.
///
/// Derives and verifies a self-certifying identifier prefix from an
/// inception key event dict using the derivation selected by code: basic
/// (copy of the public key), self-addressing (digest of the event with the
/// prefix blanked) or self-signing (signature over the event).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prefixer {
    base: BaseMatter,
}

impl Prefixer {
    /// Creates a Prefixer from raw material and code
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
        Self::check_code(base.code())?;
        Ok(Self { base })
    }

    fn check_code(code: &str) -> Result<()> {
        match code {
            cry_one_dex::ED25519N
            | cry_one_dex::ED25519
            | cry_one_dex::BLAKE3_256
            | cry_two_dex::ED25519_SIG => Ok(()),
            _ => Err(Error::Validation(format!(
                "Unsupported code = {} for prefixer",
                code
            ))),
        }
    }

    /// Derives a Prefixer from an inception key event dict.
    ///
    /// When code is None it is taken from the i field of the ked. seed or
    /// secret supply the signing key for the self-signing derivation.
    pub fn from_ked(
        ked: &Ked,
        code: Option<&str>,
        seed: Option<&[u8]>,
        secret: Option<&str>,
    ) -> Result<Self> {
        let ilk = ked
            .get("t")
            .and_then(KedValue::as_str)
            .ok_or_else(|| Error::Derivation("Missing ilk in ked".to_string()))?;
        if ilk != ilk_dex::ICP && ilk != ilk_dex::DIP {
            return Err(Error::Derivation(format!(
                "Nonincepting ilk = {} for prefix derivation",
                ilk
            )));
        }

        let code = match code {
            Some(code) => code.to_string(),
            None => {
                let pre = ked
                    .get("i")
                    .and_then(KedValue::as_str)
                    .ok_or_else(|| Error::Derivation("Missing prefix in ked".to_string()))?;
                BaseMatter::from_qb64(pre)?.code().to_string()
            }
        };
        Self::check_code(&code)?;

        let (raw, code) = match code.as_str() {
            cry_one_dex::ED25519N => Self::derive_ed25519n(ked)?,
            cry_one_dex::ED25519 => Self::derive_ed25519(ked)?,
            cry_one_dex::BLAKE3_256 => Self::derive_blake3_256(ked)?,
            _ => Self::derive_sig_ed25519(ked, seed, secret)?,
        };

        Self::new(&raw, &code)
    }

    /// Returns true if the derivation from ked for .code matches .qb64.
    /// When prefixed also requires the i field match .qb64. Returns false
    /// on any internal error rather than raising.
    pub fn verify(&self, ked: &Ked, prefixed: bool) -> bool {
        let ilk = match ked.get("t").and_then(KedValue::as_str) {
            Some(ilk) => ilk,
            None => return false,
        };
        if ilk != ilk_dex::ICP && ilk != ilk_dex::DIP {
            return false;
        }

        match self.base.code() {
            cry_one_dex::ED25519N => self.verify_ed25519n(ked, prefixed),
            cry_one_dex::ED25519 => self.verify_ed25519(ked, prefixed),
            cry_one_dex::BLAKE3_256 => self.verify_blake3_256(ked, prefixed),
            _ => self.verify_sig_ed25519(ked, prefixed),
        }
    }

    /// Returns the single verification key from the ked key list
    fn single_verfer(ked: &Ked) -> Result<Verfer> {
        let keys = ked
            .get("k")
            .and_then(KedValue::as_array)
            .ok_or_else(|| Error::Derivation("Error extracting keys from ked".to_string()))?;
        if keys.len() != 1 {
            return Err(Error::Derivation(format!(
                "Basic derivation needs 1 key got {} keys instead",
                keys.len()
            )));
        }
        let key = keys[0]
            .as_str()
            .ok_or_else(|| Error::Derivation("Key is not a string".to_string()))?;
        Verfer::from_qb64(key).map_err(|e| {
            Error::Derivation(format!("Error extracting public key = {}", e))
        })
    }

    fn nxt_is_empty(ked: &Ked) -> bool {
        match ked.get("n") {
            None => true,
            Some(KedValue::String(n)) => n.is_empty(),
            Some(_) => false,
        }
    }

    /// Basic nontransferable derivation, prefix is the key raw
    fn derive_ed25519n(ked: &Ked) -> Result<(Vec<u8>, String)> {
        let verfer = Self::single_verfer(ked)?;
        if verfer.code() != cry_one_dex::ED25519N {
            return Err(Error::Derivation(format!(
                "Mismatch derivation code = {}",
                verfer.code()
            )));
        }

        if !Self::nxt_is_empty(ked) {
            return Err(Error::Derivation(format!(
                "Non-empty nxt for non-transferable code = {}",
                verfer.code()
            )));
        }

        Ok((verfer.raw().to_vec(), verfer.code().to_string()))
    }

    fn verify_ed25519n(&self, ked: &Ked, prefixed: bool) -> bool {
        let pre = self.qb64();
        let keys = match ked.get("k").and_then(KedValue::as_array) {
            Some(keys) if keys.len() == 1 => keys,
            _ => return false,
        };
        if keys[0].as_str() != Some(pre.as_str()) {
            return false;
        }
        if prefixed && ked.get("i").and_then(KedValue::as_str) != Some(pre.as_str()) {
            return false;
        }
        Self::nxt_is_empty(ked)
    }

    /// Basic transferable derivation, prefix is the key raw
    fn derive_ed25519(ked: &Ked) -> Result<(Vec<u8>, String)> {
        let verfer = Self::single_verfer(ked)?;
        if verfer.code() != cry_one_dex::ED25519 {
            return Err(Error::Derivation(format!(
                "Mismatch derivation code = {}",
                verfer.code()
            )));
        }
        Ok((verfer.raw().to_vec(), verfer.code().to_string()))
    }

    fn verify_ed25519(&self, ked: &Ked, prefixed: bool) -> bool {
        let pre = self.qb64();
        let keys = match ked.get("k").and_then(KedValue::as_array) {
            Some(keys) if keys.len() == 1 => keys,
            _ => return false,
        };
        if keys[0].as_str() != Some(pre.as_str()) {
            return false;
        }
        if prefixed && ked.get("i").and_then(KedValue::as_str) != Some(pre.as_str()) {
            return false;
        }
        true
    }

    /// Returns the canonical serialization of ked with the prefix replaced
    /// by a dummy sized for the code
    fn dummy_serder(ked: &Ked, code: &str) -> Result<Serder> {
        let mut ked = ked.clone();
        let dummy: String = std::iter::repeat(DUMMY).take(cry_size(code)?).collect();
        ked.insert("i".to_string(), KedValue::from(dummy));
        Serder::from_ked(&ked, None)
            .map_err(|e| Error::Derivation(format!("Error serializing ked = {}", e)))
    }

    /// Self-addressing derivation, prefix is the digest of the event
    fn derive_blake3_256(ked: &Ked) -> Result<(Vec<u8>, String)> {
        let serder = Self::dummy_serder(ked, cry_one_dex::BLAKE3_256)?;
        let dig = DigAlgo::Blake3_256.digest(serder.raw());
        Ok((dig, cry_one_dex::BLAKE3_256.to_string()))
    }

    fn verify_blake3_256(&self, ked: &Ked, prefixed: bool) -> bool {
        let pre = self.qb64();
        let (raw, code) = match Self::derive_blake3_256(ked) {
            Ok(derived) => derived,
            Err(_) => return false,
        };
        let crymat = match BaseMatter::new(&raw, &code, 0) {
            Ok(crymat) => crymat,
            Err(_) => return false,
        };
        if crymat.qb64() != pre {
            return false;
        }
        if prefixed && ked.get("i").and_then(KedValue::as_str) != Some(pre.as_str()) {
            return false;
        }
        true
    }

    /// Self-signing derivation, prefix is the signature over the event
    fn derive_sig_ed25519(
        ked: &Ked,
        seed: Option<&[u8]>,
        secret: Option<&str>,
    ) -> Result<(Vec<u8>, String)> {
        let serder = Self::dummy_serder(ked, cry_two_dex::ED25519_SIG)?;
        let verfer = Self::single_verfer(serder.ked())?;
        if verfer.code() != cry_one_dex::ED25519 {
            return Err(Error::Derivation(format!(
                "Invalid derivation code = {}",
                verfer.code()
            )));
        }

        let signer = match (seed, secret) {
            (Some(seed), _) => Signer::new(seed, true)
                .map_err(|e| Error::Derivation(format!("Invalid seed = {}", e)))?,
            (None, Some(secret)) => Signer::from_qb64(secret, true)
                .map_err(|e| Error::Derivation(format!("Invalid secret = {}", e)))?,
            (None, None) => {
                return Err(Error::Derivation("Missing seed or secret.".to_string()))
            }
        };

        if verfer.raw() != signer.verfer().raw() {
            return Err(Error::Derivation("Key in ked not match seed.".to_string()));
        }

        let cigar = signer
            .sign(serder.raw())
            .map_err(|e| Error::Derivation(format!("Error signing = {}", e)))?;

        Ok((cigar.raw().to_vec(), cry_two_dex::ED25519_SIG.to_string()))
    }

    fn verify_sig_ed25519(&self, ked: &Ked, prefixed: bool) -> bool {
        let pre = self.qb64();
        let serder = match Self::dummy_serder(ked, cry_two_dex::ED25519_SIG) {
            Ok(serder) => serder,
            Err(_) => return false,
        };
        let verfer = match Self::single_verfer(serder.ked()) {
            Ok(verfer) if verfer.code() == cry_one_dex::ED25519 => verfer,
            _ => return false,
        };

        if prefixed && ked.get("i").and_then(KedValue::as_str) != Some(pre.as_str()) {
            return false;
        }

        // the prefix is itself the qualified signature over the event
        let cigar = match Cigar::from_qb64(&pre, Some(verfer)) {
            Ok(cigar) => cigar,
            Err(_) => return false,
        };
        cigar
            .verfer()
            .map(|verfer| verfer.verify(cigar.raw(), serder.raw()))
            .unwrap_or(false)
    }
}

impl Matter for Prefixer {
    fn code(&self) -> &str { self.base.code() }
    fn raw(&self) -> &[u8] { self.base.raw() }
    fn index(&self) -> u32 { self.base.index() }
    fn qb64(&self) -> String { self.base.qb64() }
    fn qb64b(&self) -> Vec<u8> { self.base.qb64b() }
    fn qb2(&self) -> Vec<u8> { self.base.qb2() }
    fn transferable(&self) -> bool { self.base.transferable() }
    fn digestive(&self) -> bool { self.base.digestive() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coring::nexter::Nexter;
    use crate::coring::tholder::Tholder;
    use crate::versioning::{versify, Kinds};

    fn inception_ked(keys: &[String], nxt: &str, ilk: &str) -> Ked {
        let mut ked = Ked::new();
        ked.insert("v".to_string(), KedValue::from(versify(None, Kinds::Json, 0)));
        ked.insert("t".to_string(), KedValue::from(ilk));
        ked.insert("i".to_string(), KedValue::from(""));
        ked.insert("s".to_string(), KedValue::from("0"));
        ked.insert("kt".to_string(), KedValue::from("1"));
        ked.insert(
            "k".to_string(),
            KedValue::Array(keys.iter().map(|key| KedValue::from(key.clone())).collect()),
        );
        ked.insert("n".to_string(), KedValue::from(nxt));
        ked.insert("wt".to_string(), KedValue::from("0"));
        ked.insert("w".to_string(), KedValue::Array(vec![]));
        ked.insert("c".to_string(), KedValue::Array(vec![]));
        ked
    }

    #[test]
    fn test_prefixer_basic_nontransferable() {
        let seed = [0u8; 32];
        let signer = Signer::new(&seed, false).unwrap();
        let keys = vec![signer.verfer().qb64()];
        let ked = inception_ked(&keys, "", ilk_dex::ICP);

        let prefixer = Prefixer::from_ked(&ked, Some(cry_one_dex::ED25519N), None, None).unwrap();
        assert_eq!(prefixer.code(), "B");
        assert_eq!(prefixer.raw(), signer.verfer().raw());
        assert!(prefixer.qb64().starts_with('B'));
        assert!(prefixer.verify(&ked, false));
        assert!(!prefixer.transferable());

        // prefixed check needs the i field populated
        assert!(!prefixer.verify(&ked, true));
        let mut prefixed_ked = ked.clone();
        prefixed_ked.insert("i".to_string(), KedValue::from(prefixer.qb64()));
        assert!(prefixer.verify(&prefixed_ked, true));

        // code defaults from the ked prefix when not given
        let prefixer2 = Prefixer::from_ked(&prefixed_ked, None, None, None).unwrap();
        assert_eq!(prefixer2.qb64(), prefixer.qb64());

        // non-empty nxt forbidden for non-transferable derivation
        let nexter = Nexter::from_keys(
            &[keys[0].as_str()],
            Some(&Tholder::from_sith("1").unwrap()),
        )
        .unwrap();
        let bad = inception_ked(&keys, &nexter.qb64(), ilk_dex::ICP);
        assert!(matches!(
            Prefixer::from_ked(&bad, Some(cry_one_dex::ED25519N), None, None),
            Err(Error::Derivation(_))
        ));

        // transferable key code mismatches non-transferable derivation
        let signer = Signer::new(&seed, true).unwrap();
        let keys = vec![signer.verfer().qb64()];
        let ked = inception_ked(&keys, "", ilk_dex::ICP);
        assert!(matches!(
            Prefixer::from_ked(&ked, Some(cry_one_dex::ED25519N), None, None),
            Err(Error::Derivation(_))
        ));
    }

    #[test]
    fn test_prefixer_basic_transferable() {
        let signer = Signer::new(&[5u8; 32], true).unwrap();
        let keys = vec![signer.verfer().qb64()];
        let ked = inception_ked(&keys, "", ilk_dex::ICP);

        let prefixer = Prefixer::from_ked(&ked, Some(cry_one_dex::ED25519), None, None).unwrap();
        assert_eq!(prefixer.code(), "D");
        assert_eq!(prefixer.raw(), signer.verfer().raw());
        assert!(prefixer.verify(&ked, false));

        // two keys break basic derivation
        let signer2 = Signer::new(&[6u8; 32], true).unwrap();
        let two = vec![signer.verfer().qb64(), signer2.verfer().qb64()];
        let ked = inception_ked(&two, "", ilk_dex::ICP);
        assert!(matches!(
            Prefixer::from_ked(&ked, Some(cry_one_dex::ED25519), None, None),
            Err(Error::Derivation(_))
        ));

        // non-incepting ilk cannot derive
        let ked = inception_ked(&keys, "", ilk_dex::ROT);
        assert!(matches!(
            Prefixer::from_ked(&ked, Some(cry_one_dex::ED25519), None, None),
            Err(Error::Derivation(_))
        ));
    }

    #[test]
    fn test_prefixer_self_addressing() {
        let signer0 = Signer::new(&[7u8; 32], true).unwrap();
        let signer1 = Signer::new(&[8u8; 32], true).unwrap();
        let keys = vec![signer0.verfer().qb64(), signer1.verfer().qb64()];
        let nxt_keys = vec![signer1.verfer().qb64()];
        let nexter = Nexter::from_keys(&[nxt_keys[0].as_str()], None).unwrap();
        let ked = inception_ked(&keys, &nexter.qb64(), ilk_dex::ICP);

        let prefixer = Prefixer::from_ked(&ked, Some(cry_one_dex::BLAKE3_256), None, None).unwrap();
        assert_eq!(prefixer.code(), "E");
        assert!(prefixer.qb64().starts_with('E'));
        assert!(prefixer.digestive());
        assert!(prefixer.verify(&ked, false));

        // derivation ignores the i field, the dummy replaces it
        let mut prefixed_ked = ked.clone();
        prefixed_ked.insert("i".to_string(), KedValue::from(prefixer.qb64()));
        assert!(prefixer.verify(&prefixed_ked, true));
        let prefixer2 =
            Prefixer::from_ked(&prefixed_ked, Some(cry_one_dex::BLAKE3_256), None, None).unwrap();
        assert_eq!(prefixer2.qb64(), prefixer.qb64());

        // mutating any non-i field breaks verification
        let mut mutated = ked.clone();
        mutated.insert("s".to_string(), KedValue::from("1"));
        assert!(!prefixer.verify(&mutated, false));

        let mut mutated = ked.clone();
        mutated.insert("kt".to_string(), KedValue::from("2"));
        assert!(!prefixer.verify(&mutated, false));

        // delegated inception derives too
        let dip = inception_ked(&keys, &nexter.qb64(), ilk_dex::DIP);
        let prefixer3 = Prefixer::from_ked(&dip, Some(cry_one_dex::BLAKE3_256), None, None).unwrap();
        assert!(prefixer3.verify(&dip, false));
        assert_ne!(prefixer3.qb64(), prefixer.qb64());
    }

    #[test]
    fn test_prefixer_self_signing() {
        let seed = [9u8; 32];
        let signer = Signer::new(&seed, true).unwrap();
        let keys = vec![signer.verfer().qb64()];
        let ked = inception_ked(&keys, "", ilk_dex::ICP);

        let prefixer =
            Prefixer::from_ked(&ked, Some(cry_two_dex::ED25519_SIG), Some(&seed), None).unwrap();
        assert_eq!(prefixer.code(), "0B");
        assert_eq!(prefixer.qb64().len(), 88);
        assert!(prefixer.verify(&ked, false));

        // secret form of the signing key works the same
        let prefixer2 = Prefixer::from_ked(
            &ked,
            Some(cry_two_dex::ED25519_SIG),
            None,
            Some(&signer.qb64()),
        )
        .unwrap();
        assert_eq!(prefixer2.qb64(), prefixer.qb64());

        // missing seed and secret
        assert!(matches!(
            Prefixer::from_ked(&ked, Some(cry_two_dex::ED25519_SIG), None, None),
            Err(Error::Derivation(_))
        ));

        // seed not matching the listed key
        let other = [10u8; 32];
        assert!(matches!(
            Prefixer::from_ked(&ked, Some(cry_two_dex::ED25519_SIG), Some(&other), None),
            Err(Error::Derivation(_))
        ));

        // mutated event no longer verifies
        let mut mutated = ked.clone();
        mutated.insert("s".to_string(), KedValue::from("1"));
        assert!(!prefixer.verify(&mutated, false));
    }

    #[test]
    fn test_prefixer_material_constructors() {
        let raw: Vec<u8> = (0u8..32).collect();
        let prefixer = Prefixer::new(&raw, cry_one_dex::ED25519N).unwrap();
        let prefixer2 = Prefixer::from_qb64(&prefixer.qb64()).unwrap();
        assert_eq!(prefixer2, prefixer);
        let prefixer3 = Prefixer::from_qb2(&prefixer.qb2()).unwrap();
        assert_eq!(prefixer3, prefixer);

        // codes without a prefix derivation are rejected
        assert!(Prefixer::new(&raw, cry_one_dex::ED25519_SEED).is_err());
        assert!(Prefixer::new(&raw, cry_one_dex::SHA3_256).is_err());
    }
}

use num_rational::Ratio;
use num_traits::One;

use crate::errors::{Error, Result};
use crate::serdering::ked::KedValue;

/// Parsed signing threshold
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Thold {
    /// Numeric threshold, minimum count of verified signatures
    Numeric(usize),
    /// Clauses of exact fractional weights, every clause must be satisfied
    Weighted(Vec<Vec<Ratio<u64>>>),
}

/// Tholder is the KERI signing threshold satisfaction class.
///
/// .satisfy evaluates satisfaction from a list of indices of verified
/// signatures where indices are offsets into the associated key list.
/// .limen is the string commitment to the threshold used in next key
/// commitments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tholder {
    thold: Thold,
    size: usize,
    limen: String,
}

impl Tholder {
    /// Parses a numeric threshold from a lowercase hex string
    pub fn from_sith(sith: &str) -> Result<Self> {
        let thold = usize::from_str_radix(sith, 16)
            .map_err(|e| Error::Validation(format!("Invalid sith = {}: {}", sith, e)))?;
        if thold < 1 {
            return Err(Error::Validation(format!("Invalid sith = {} < 1", thold)));
        }
        Ok(Self {
            thold: Thold::Numeric(thold),
            size: thold,
            limen: sith.to_string(),
        })
    }

    /// Parses a fractionally weighted threshold from one or more clauses of
    /// fraction strings. Every clause must sum to at least one.
    pub fn from_weights(clauses: &[Vec<&str>]) -> Result<Self> {
        if clauses.is_empty() || clauses.iter().any(|clause| clause.is_empty()) {
            return Err(Error::Validation(
                "Invalid sith, empty weight list".to_string(),
            ));
        }

        let mut thold = Vec::with_capacity(clauses.len());
        for clause in clauses {
            let mut weights = Vec::with_capacity(clause.len());
            for w in clause {
                let weight = w.parse::<Ratio<u64>>().map_err(|e| {
                    Error::Validation(format!("Invalid weight = {}: {}", w, e))
                })?;
                weights.push(weight);
            }
            // exact rational sum, no rounding
            let sum: Ratio<u64> = weights.iter().sum();
            if sum < Ratio::one() {
                return Err(Error::Validation(format!(
                    "Invalid sith clause = {:?}, all clause weight sums must be >= 1",
                    clause
                )));
            }
            thold.push(weights);
        }

        let size = thold.iter().map(|clause| clause.len()).sum();
        let limen = clauses
            .iter()
            .map(|clause| clause.join(","))
            .collect::<Vec<_>>()
            .join("&");

        Ok(Self {
            thold: Thold::Weighted(thold),
            size,
            limen,
        })
    }

    /// Parses a threshold from a key event dict kt field value, either a
    /// hex string, a list of fraction strings, or a list of lists
    pub fn from_value(value: &KedValue) -> Result<Self> {
        match value {
            KedValue::String(sith) => Self::from_sith(sith),
            KedValue::Array(items) => {
                if items.iter().all(|item| matches!(item, KedValue::String(_))) {
                    let clause = items
                        .iter()
                        .filter_map(|item| item.as_str())
                        .collect::<Vec<_>>();
                    Self::from_weights(&[clause])
                } else if items.iter().all(|item| matches!(item, KedValue::Array(_))) {
                    let mut clauses = Vec::with_capacity(items.len());
                    for item in items {
                        let inner = match item {
                            KedValue::Array(inner) => inner,
                            _ => unreachable!(),
                        };
                        if !inner.iter().all(|w| matches!(w, KedValue::String(_))) {
                            return Err(Error::Validation(
                                "Invalid sith, weights must be strings".to_string(),
                            ));
                        }
                        clauses.push(inner.iter().filter_map(|w| w.as_str()).collect::<Vec<_>>());
                    }
                    Self::from_weights(&clauses)
                } else {
                    Err(Error::Validation(
                        "Invalid sith, mixed weight clause forms".to_string(),
                    ))
                }
            }
            _ => Err(Error::Validation(
                "Invalid sith, must be hex string or weight list".to_string(),
            )),
        }
    }

    /// Returns the parsed threshold
    pub fn thold(&self) -> &Thold {
        &self.thold
    }

    /// Returns true for a fractionally weighted threshold
    pub fn weighted(&self) -> bool {
        matches!(self.thold, Thold::Weighted(_))
    }

    /// Returns the minimum size of the associated key list
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the string commitment to the threshold
    pub fn limen(&self) -> &str {
        &self.limen
    }

    /// Returns true if the indices of verified signatures satisfy the
    /// threshold. Out of range indices never satisfy.
    pub fn satisfy(&self, indices: &[usize]) -> bool {
        match &self.thold {
            Thold::Numeric(thold) => {
                let mut distinct = indices.to_vec();
                distinct.sort_unstable();
                distinct.dedup();
                distinct.len() >= *thold
            }
            Thold::Weighted(clauses) => {
                if indices.is_empty() {
                    return false;
                }

                let mut distinct = indices.to_vec();
                distinct.sort_unstable();
                distinct.dedup();

                let mut sats = vec![false; self.size];
                for &idx in &distinct {
                    if idx >= self.size {
                        return false;
                    }
                    sats[idx] = true;
                }

                let mut wio = 0; // weight index offset across clauses
                for clause in clauses {
                    let mut cw: Ratio<u64> = Ratio::new(0, 1);
                    for w in clause {
                        if sats[wio] {
                            cw += *w;
                        }
                        wio += 1;
                    }
                    if cw < Ratio::one() {
                        return false;
                    }
                }

                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tholder_numeric() {
        let tholder = Tholder::from_sith("2").unwrap();
        assert!(!tholder.weighted());
        assert_eq!(tholder.thold(), &Thold::Numeric(2));
        assert_eq!(tholder.size(), 2);
        assert_eq!(tholder.limen(), "2");

        assert!(tholder.satisfy(&[0, 1]));
        assert!(tholder.satisfy(&[0, 2, 4]));
        assert!(!tholder.satisfy(&[0]));
        // duplicates do not count twice
        assert!(!tholder.satisfy(&[1, 1]));
        assert!(!tholder.satisfy(&[]));

        // hex parse
        let tholder = Tholder::from_sith("b").unwrap();
        assert_eq!(tholder.thold(), &Thold::Numeric(11));

        assert!(Tholder::from_sith("0").is_err());
        assert!(Tholder::from_sith("").is_err());
        assert!(Tholder::from_sith("1/2").is_err());
    }

    #[test]
    fn test_tholder_weighted() {
        let tholder = Tholder::from_weights(&[vec!["1/2", "1/2", "1/2"]]).unwrap();
        assert!(tholder.weighted());
        assert_eq!(tholder.size(), 3);
        assert_eq!(tholder.limen(), "1/2,1/2,1/2");

        assert!(tholder.satisfy(&[0, 2]));
        assert!(tholder.satisfy(&[0, 1]));
        assert!(tholder.satisfy(&[0, 1, 2]));
        assert!(!tholder.satisfy(&[0]));
        assert!(!tholder.satisfy(&[0, 0]));
        assert!(!tholder.satisfy(&[]));
        // out of range index never satisfies
        assert!(!tholder.satisfy(&[0, 3]));
    }

    #[test]
    fn test_tholder_multi_clause() {
        let tholder =
            Tholder::from_weights(&[vec!["1/2", "1/2"], vec!["1/2", "1/2"]]).unwrap();
        assert_eq!(tholder.size(), 4);
        assert_eq!(tholder.limen(), "1/2,1/2&1/2,1/2");

        // a clause is met only when its marked weights sum to >= 1, so a
        // lone 1/2 in either clause never qualifies
        assert!(!tholder.satisfy(&[0, 1]));
        assert!(!tholder.satisfy(&[0, 2]));
        assert!(!tholder.satisfy(&[1, 3]));
        assert!(!tholder.satisfy(&[2, 3]));
        assert!(tholder.satisfy(&[0, 1, 2, 3]));
    }

    #[test]
    fn test_tholder_exact_rationals() {
        // exact arithmetic, no float rounding
        let tholder = Tholder::from_weights(&[vec!["1/3", "1/3", "1/3"]]).unwrap();
        assert!(tholder.satisfy(&[0, 1, 2]));
        assert!(!tholder.satisfy(&[0, 1]));

        // whole number weights are fractions too
        let tholder = Tholder::from_weights(&[vec!["1", "0"]]).unwrap();
        assert!(tholder.satisfy(&[0]));
        assert!(!tholder.satisfy(&[1]));

        // every clause must sum to at least one
        assert!(Tholder::from_weights(&[vec!["1/2", "1/4"]]).is_err());
        assert!(Tholder::from_weights(&[vec!["1/2", "1/2"], vec!["1/4"]]).is_err());
        assert!(Tholder::from_weights(&[]).is_err());
        assert!(Tholder::from_weights(&[vec![]]).is_err());
        assert!(Tholder::from_weights(&[vec!["x/y"]]).is_err());
    }

    #[test]
    fn test_tholder_from_value() {
        let tholder = Tholder::from_value(&KedValue::from("2")).unwrap();
        assert_eq!(tholder.thold(), &Thold::Numeric(2));

        let kt = KedValue::Array(vec![KedValue::from("1/2"), KedValue::from("1/2")]);
        let tholder = Tholder::from_value(&kt).unwrap();
        assert!(tholder.weighted());
        assert_eq!(tholder.limen(), "1/2,1/2");

        let kt = KedValue::Array(vec![
            KedValue::Array(vec![
                KedValue::from("1/2"),
                KedValue::from("1/2"),
                KedValue::from("1/2"),
            ]),
            KedValue::Array(vec![KedValue::from("1/2"), KedValue::from("1/2")]),
        ]);
        let tholder = Tholder::from_value(&kt).unwrap();
        assert_eq!(tholder.limen(), "1/2,1/2,1/2&1/2,1/2");
        assert_eq!(tholder.size(), 5);

        assert!(Tholder::from_value(&KedValue::Bool(true)).is_err());
    }
}

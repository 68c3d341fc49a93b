use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::utils::digest_bytes;

use super::{EnvironmentMap, SerializationError};

/// Number of hex characters in a rendered fingerprint (128-bit digest)
pub const FINGERPRINT_HEX_LEN: usize = 32;

/// How keys are ordered before the environment is serialized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyOrder {
    /// Keys sorted lexicographically; insertion order does not matter
    #[default]
    Sorted,
    /// Keys in the order they were inserted or enumerated
    Insertion,
}

impl fmt::Display for KeyOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyOrder::Sorted => write!(f, "sorted"),
            KeyOrder::Insertion => write!(f, "insertion"),
        }
    }
}

/// Deterministic digest of an environment, rendered as lowercase hex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint(u128);

impl Fingerprint {
    pub fn as_hex(&self) -> String {
        format!("{:032x}", self.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("invalid fingerprint `{0}`: expected 32 lowercase hex characters")]
pub struct ParseFingerprintError(String);

impl FromStr for Fingerprint {
    type Err = ParseFingerprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let well_formed = s.len() == FINGERPRINT_HEX_LEN
            && s.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        if !well_formed {
            return Err(ParseFingerprintError(s.to_string()));
        }

        u128::from_str_radix(s, 16)
            .map(Fingerprint)
            .map_err(|_| ParseFingerprintError(s.to_string()))
    }
}

impl Serialize for Fingerprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_hex())
    }
}

impl<'de> Deserialize<'de> for Fingerprint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Fingerprint an environment with keys sorted
pub fn fingerprint(env: &EnvironmentMap) -> Result<Fingerprint, SerializationError> {
    fingerprint_with(env, KeyOrder::Sorted)
}

/// Fingerprint an environment using the given key order
pub fn fingerprint_with(
    env: &EnvironmentMap,
    order: KeyOrder,
) -> Result<Fingerprint, SerializationError> {
    let bytes = canonical_bytes(env, order)?;
    Ok(Fingerprint(digest_bytes(&bytes)))
}

/// Coerce a JSON object into an environment and fingerprint it
pub fn fingerprint_json(value: &Value) -> Result<Fingerprint, SerializationError> {
    fingerprint(&EnvironmentMap::from_json(value)?)
}

/// Compact JSON object encoding of the environment
pub fn canonical_bytes(env: &EnvironmentMap, order: KeyOrder) -> Result<Vec<u8>, SerializationError> {
    let bytes = match order {
        KeyOrder::Sorted => {
            let sorted: BTreeMap<&str, &str> = env.iter().collect();
            serde_json::to_vec(&sorted)?
        }
        KeyOrder::Insertion => serde_json::to_vec(env)?,
    };
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn env(pairs: &[(&str, &str)]) -> EnvironmentMap {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_repeated_calls_agree() {
        let m = env(&[("PATH", "/usr/bin"), ("HOME", "/root")]);
        assert_eq!(fingerprint(&m).unwrap(), fingerprint(&m).unwrap());
        assert_eq!(fingerprint(&m).unwrap(), fingerprint(&m.clone()).unwrap());
    }

    #[test]
    fn test_insertion_order_does_not_matter() {
        let m1 = env(&[("A", "1"), ("B", "2"), ("C", "3")]);
        let m2 = env(&[("C", "3"), ("A", "1"), ("B", "2")]);
        assert_eq!(fingerprint(&m1).unwrap(), fingerprint(&m2).unwrap());
    }

    #[test]
    fn test_value_change_changes_fingerprint() {
        let m1 = env(&[("A", "1")]);
        let m2 = env(&[("A", "2")]);
        assert_ne!(fingerprint(&m1).unwrap(), fingerprint(&m2).unwrap());
    }

    #[test]
    fn test_key_value_boundaries_are_unambiguous() {
        let m1 = env(&[("AB", "C")]);
        let m2 = env(&[("A", "BC")]);
        assert_ne!(fingerprint(&m1).unwrap(), fingerprint(&m2).unwrap());
    }

    #[test]
    fn test_empty_environment() {
        let fp = fingerprint(&EnvironmentMap::new()).unwrap();
        assert_eq!(fp.as_hex().len(), FINGERPRINT_HEX_LEN);
        assert_eq!(canonical_bytes(&EnvironmentMap::new(), KeyOrder::Sorted).unwrap(), b"{}");
    }

    #[test]
    fn test_output_is_lowercase_hex() {
        for m in [env(&[]), env(&[("A", "1")]), env(&[("NODE_ENV", "production")])] {
            let hex = fingerprint(&m).unwrap().to_string();
            assert_eq!(hex.len(), FINGERPRINT_HEX_LEN);
            assert!(hex.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        }
    }

    #[test]
    fn test_insertion_mode_is_order_sensitive() {
        let m1 = env(&[("A", "1"), ("B", "2")]);
        let m2 = env(&[("B", "2"), ("A", "1")]);

        assert_ne!(
            fingerprint_with(&m1, KeyOrder::Insertion).unwrap(),
            fingerprint_with(&m2, KeyOrder::Insertion).unwrap()
        );
        assert_eq!(
            fingerprint_with(&m1, KeyOrder::Sorted).unwrap(),
            fingerprint_with(&m2, KeyOrder::Sorted).unwrap()
        );
    }

    #[test]
    fn test_canonical_bytes_sort_keys() {
        let m = env(&[("B", "2"), ("A", "1")]);
        assert_eq!(canonical_bytes(&m, KeyOrder::Sorted).unwrap(), br#"{"A":"1","B":"2"}"#);
        assert_eq!(canonical_bytes(&m, KeyOrder::Insertion).unwrap(), br#"{"B":"2","A":"1"}"#);
    }

    #[test]
    fn test_json_coercion_matches_text_values() {
        let coerced = fingerprint_json(&json!({"N": 1, "B": true})).unwrap();
        let text = fingerprint(&env(&[("N", "1"), ("B", "true")])).unwrap();
        assert_eq!(coerced, text);

        assert!(fingerprint_json(&json!({"X": null})).is_err());
    }

    #[test]
    fn test_parse_roundtrip_and_rejects_uppercase() {
        let fp = fingerprint(&env(&[("A", "1")])).unwrap();
        assert_eq!(fp.as_hex().parse::<Fingerprint>().unwrap(), fp);
        assert!("ABCDEF0123456789ABCDEF0123456789".parse::<Fingerprint>().is_err());
        assert!("abc".parse::<Fingerprint>().is_err());
    }
}

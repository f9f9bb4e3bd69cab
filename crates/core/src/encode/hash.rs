use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha512};

use crate::error::ToolError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    Md5,
    Sha256,
    Sha512,
}

impl HashAlgorithm {
    pub const ALL: [HashAlgorithm; 3] = [HashAlgorithm::Md5, HashAlgorithm::Sha256, HashAlgorithm::Sha512];

    pub fn name(self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "md5",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha512 => "sha512",
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase().replace('-', "");
        HashAlgorithm::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| ToolError::invalid(format!("Unknown hash algorithm '{s}'")))
    }
}

/// Lowercase hex digest of the UTF-8 bytes of `input`.
pub fn hash_text(input: &str, algorithm: HashAlgorithm) -> String {
    match algorithm {
        HashAlgorithm::Md5 => format!("{:x}", md5::compute(input.as_bytes())),
        HashAlgorithm::Sha256 => hex(&Sha256::digest(input.as_bytes())),
        HashAlgorithm::Sha512 => hex(&Sha512::digest(input.as_bytes())),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HashDigest {
    pub algorithm: HashAlgorithm,
    pub hex: String,
}

/// Every supported digest of `input`, in a fixed order.
pub fn hash_all(input: &str) -> Vec<HashDigest> {
    HashAlgorithm::ALL
        .iter()
        .map(|&algorithm| HashDigest {
            algorithm,
            hex: hash_text(input, algorithm),
        })
        .collect()
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_from_str() {
        assert_eq!("SHA-256".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha256);
        assert!("crc32".parse::<HashAlgorithm>().is_err());
    }

    #[test]
    fn test_md5() {
        assert_eq!(
            hash_text("hello", HashAlgorithm::Md5),
            "5d41402abc4b2a76b9719d911017c592"
        );
    }

    #[test]
    fn test_sha256() {
        assert_eq!(
            hash_text("hello", HashAlgorithm::Sha256),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn test_sha512_length() {
        assert_eq!(hash_text("", HashAlgorithm::Sha512).len(), 128);
    }

    #[test]
    fn test_hash_all_order() {
        let digests = hash_all("x");
        let names: Vec<_> = digests.iter().map(|d| d.algorithm.name()).collect();
        assert_eq!(names, ["md5", "sha256", "sha512"]);
    }
}

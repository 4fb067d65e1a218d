//! Bounded ABI identifier and the ABI names the selector knows about.
//!
//! `AbiName` serializes as a plain string and validates on the way in.

use crate::SchemaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// Exclusive upper bound on the byte length of an ABI name.
pub const ABI_NAME_MAX_LENGTH: usize = 64;

pub const ARMEABI: &str = "armeabi";
pub const ARMEABI_V7A: &str = "armeabi-v7a";
pub const ARM64_V8A: &str = "arm64-v8a";
pub const X86: &str = "x86";
pub const X86_64: &str = "x86_64";

/// Name of a `lib/<abi>/` folder, e.g. `arm64-v8a` or `x86_64`.
///
/// Always 1 to 63 bytes and never contains `/`. Input that breaks either rule
/// is rejected, never truncated.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AbiName(String);

impl AbiName {
    pub fn new(s: impl Into<String>) -> Result<Self, SchemaError> {
        let s = s.into();
        validate_abi_name(&s)?;
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the x86 family, whose folders are checked for mixed binaries.
    pub fn is_x86_family(&self) -> bool {
        self.0 == X86 || self.0 == X86_64
    }
}

fn validate_abi_name(name: &str) -> Result<(), SchemaError> {
    let reason = if name.is_empty() {
        "must not be empty"
    } else if name.len() >= ABI_NAME_MAX_LENGTH {
        "must be shorter than 64 bytes"
    } else if name.contains('/') {
        "must not contain '/'"
    } else {
        return Ok(());
    };
    Err(SchemaError::InvalidAbiName {
        name: name.to_owned(),
        reason,
    })
}

impl Deref for AbiName {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AbiName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AbiName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for AbiName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for AbiName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl TryFrom<String> for AbiName {
    type Error = SchemaError;
    fn try_from(s: String) -> Result<Self, SchemaError> {
        Self::new(s)
    }
}

impl TryFrom<&str> for AbiName {
    type Error = SchemaError;
    fn try_from(s: &str) -> Result<Self, SchemaError> {
        Self::new(s)
    }
}

impl From<AbiName> for String {
    fn from(name: AbiName) -> Self {
        name.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_known_abis() {
        for name in [ARMEABI, ARMEABI_V7A, ARM64_V8A, X86, X86_64] {
            let abi = AbiName::new(name).unwrap();
            assert_eq!(abi.as_str(), name);
            assert_eq!(abi.to_string(), name);
        }
    }

    #[test]
    fn rejects_empty() {
        assert!(AbiName::new("").is_err());
    }

    #[test]
    fn length_bound_is_exclusive() {
        assert!(AbiName::new("a".repeat(63)).is_ok());
        assert!(AbiName::new("a".repeat(64)).is_err());
    }

    #[test]
    fn rejects_nested_folder() {
        assert!(AbiName::new("x86/sub").is_err());
    }

    #[test]
    fn comparison_is_case_sensitive() {
        let abi = AbiName::new("x86").unwrap();
        assert!(abi == "x86");
        assert!(abi != "X86");
    }

    #[test]
    fn x86_family() {
        assert!(AbiName::new(X86).unwrap().is_x86_family());
        assert!(AbiName::new(X86_64).unwrap().is_x86_family());
        assert!(!AbiName::new(ARM64_V8A).unwrap().is_x86_family());
        assert!(!AbiName::new(ARMEABI_V7A).unwrap().is_x86_family());
    }

    #[test]
    fn serde_validates_on_deserialize() {
        let abi = AbiName::new("x86_64").unwrap();
        let json = serde_json::to_string(&abi).unwrap();
        assert_eq!(json, "\"x86_64\"");
        let back: AbiName = serde_json::from_str(&json).unwrap();
        assert_eq!(back, abi);
        assert!(serde_json::from_str::<AbiName>("\"\"").is_err());
    }
}

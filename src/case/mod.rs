mod assembly_returns;
mod runner;

pub use assembly_returns::{AssemblyReturnsCase, AssemblyReturnsParams, EXPECTED_ADDRESS};
pub use runner::Runner;

use crate::{
    contract::{Artifacts, ContractError},
    data_source::{DataSourceError, Params},
    report::{CaseMetadata, Collector},
    rpc::TransactionManager,
};
use async_trait::async_trait;
use std::borrow::Cow;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaseError {
    #[error(transparent)]
    Params(#[from] DataSourceError),
    #[error(transparent)]
    Contract(#[from] ContractError),
}

/// Everything a case needs to talk to the chain.
pub struct CaseContext<'a> {
    pub manager: &'a TransactionManager,
    pub artifacts: &'a Artifacts,
}

/// A data-driven contract test. `run` is invoked once per data row.
#[async_trait]
pub trait ContractCase: Send + Sync {
    fn metadata(&self) -> &CaseMetadata;

    async fn run(
        &self,
        ctx: &CaseContext<'_>,
        params: &Params,
        collector: &mut Collector,
    ) -> Result<(), CaseError>;
}

/// Lowercase hex without `0x`, the form expected values are written in.
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Strips surrounding whitespace and a `0x`/`0X` prefix, and lowercases.
/// Borrows `value` when it is already in canonical form.
pub fn normalize_hex(value: &str) -> Cow<'_, str> {
    let trimmed = value.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    if digits.len() == value.len() && !digits.bytes().any(|b| b.is_ascii_uppercase()) {
        Cow::Borrowed(value)
    } else {
        Cow::Owned(digits.to_ascii_lowercase())
    }
}

/// Expected hex value of parameter `name`, in canonical form.
pub fn expected_hex<'a>(name: &str, value: &'a str) -> Cow<'a, str> {
    let normalized = normalize_hex(value);
    if let Cow::Owned(canonical) = &normalized {
        tracing::warn!(
            param = name,
            value,
            canonical = canonical.as_str(),
            "expected hex value is not lowercase without 0x, comparing its canonical form"
        );
    }
    normalized
}

pub fn all_cases() -> Vec<Box<dyn ContractCase>> {
    vec![Box::new(AssemblyReturnsCase::default())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_forms() {
        assert_eq!(to_hex(&[0xab, 0x01]), "ab01");
        assert_eq!(normalize_hex("0xAB01"), "ab01");
        assert_eq!(normalize_hex(" ab01 "), "ab01");
    }

    #[test]
    fn only_non_canonical_values_are_rewritten() {
        assert!(matches!(normalize_hex("ab01"), Cow::Borrowed("ab01")));
        assert!(matches!(normalize_hex(""), Cow::Borrowed("")));
        for value in ["0xab01", "0Xab01", "AB01", "ab01\n"] {
            assert!(
                matches!(normalize_hex(value), Cow::Owned(ref canonical) if canonical == "ab01"),
                "{value:?}"
            );
        }
        assert!(matches!(expected_hex("C", "616263"), Cow::Borrowed(_)));
        assert_eq!(expected_hex("C", "0x616263"), "616263");
    }
}

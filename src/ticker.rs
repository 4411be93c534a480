//! Fund ticker symbol.

use serde::{Deserialize, Serialize};

/// An ETF ticker symbol (e.g. "VTI").
///
/// Ordered lexicographically. Sorted-ticker iteration is what keeps float
/// sums and trim tie-breaks reproducible across runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ticker(String);

impl Ticker {
    pub fn new(s: &str) -> Self {
        Ticker(s.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Ticker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // pad() keeps width specifiers working in table output
        f.pad(&self.0)
    }
}

impl From<&str> for Ticker {
    fn from(s: &str) -> Self {
        Ticker::new(s)
    }
}

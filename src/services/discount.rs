use serde::{Deserialize, Serialize};

/// One row of the code table from the data file. `discount` is a
/// percentage in (0, 100].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountCode {
    pub code: String,
    pub discount: u8,
    #[serde(default)]
    pub description: Option<String>,
}

/// Pure lookup over the provided code table. Codes are expected to be
/// normalized already; rejecting empty input is the caller's job.
#[derive(Debug, Clone, Default)]
pub struct DiscountTable {
    codes: Vec<DiscountCode>,
}

impl DiscountTable {
    pub fn new(codes: Vec<DiscountCode>) -> Self {
        Self { codes }
    }

    pub fn resolve(&self, code: &str) -> Option<&DiscountCode> {
        self.codes.iter().find(|d| d.code == code)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// Trims and uppercases user input; empty or whitespace-only codes are
/// rejected here, before any lookup happens.
pub fn normalize_code(input: &str) -> Option<String> {
    let code = input.trim().to_uppercase();
    if code.is_empty() { None } else { Some(code) }
}

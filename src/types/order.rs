//! Ordering directives shared by the permutation engine and batch comparison.

use serde::{Deserialize, Serialize};

/// Where NaN values sort relative to every other value.
///
/// The hint describes the *value* ordering, not the output position: under
/// `Greatest`, an ascending sort puts NaNs last and a descending sort puts them
/// first. All NaNs compare equal to each other.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NanHint {
    #[default]
    Greatest,
    Least,
}

impl NanHint {
    /// Maps the conventional integer hint (`> 0` greatest, otherwise least).
    pub fn from_int(hint: i32) -> Self {
        if hint > 0 {
            NanHint::Greatest
        } else {
            NanHint::Least
        }
    }
}

/// Requested sort direction for a key column.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// `1` for ascending, `-1` for descending.
    pub fn sign(&self) -> i32 {
        match self {
            SortDirection::Ascending => 1,
            SortDirection::Descending => -1,
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::util::{collapse_whitespace, truncate_chars};

/// Marker for a field that no strategy could resolve. Never confused with `""`.
pub const NA: &str = "N/A";

pub const BUDGET_MAX_CHARS: usize = 100;
pub const ELLIPSIS: &str = "...";

/// One job tile as it was visible on the page when extraction started.
///
/// Field order here is the order written to the output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    pub title: String,
    pub url: String,
    pub description: String,
    pub budget_info: String,
    pub payment_verified: bool,
    pub rating: String,
}

impl JobListing {
    #[inline]
    pub fn has_url(&self) -> bool {
        self.url != NA
    }
}

/// Collapses whitespace and truncates to [`BUDGET_MAX_CHARS`], marking the cut with [`ELLIPSIS`].
///
/// Applying it twice gives the same string as applying it once.
pub fn clean_budget(raw: &str) -> String {
    let collapsed = collapse_whitespace(raw);
    if collapsed.is_empty() {
        return NA.to_owned();
    }
    truncate_chars(&collapsed, BUDGET_MAX_CHARS, ELLIPSIS)
}

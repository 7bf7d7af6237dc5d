use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    Name,
}

/// Case-insensitive substring match; an empty needle matches everything.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(needle)
}

/// Normalizes an optional search term: trimmed, lowercased, `None` when blank.
pub fn search_term(search: &Option<String>) -> Option<String> {
    search.as_ref().map(|s| s.trim().to_lowercase()).filter(|s| !s.is_empty())
}

pub fn eq_ci(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

//! # sas-cli: CLI for the Standards Self-Assessment Service
//!
//! Provides the `sas` command-line interface.
//!
//! ## Subcommands
//!
//! - `sas templates`: List the built-in template catalog (offline).
//! - `sas task create`: Create a task on a running server and print its
//!   item distribution per dimension.
//! - `sas task show <id>`: Print a task and its items.
//! - `sas task result <id>`: Print the scored result of a task.
//!
//! ```bash
//! sas templates
//! sas task create --name "2026 数据安全自评估" --organization Acme
//! sas --api http://assess.internal:8001/api task result 3
//! ```

pub mod client;
pub mod task;
pub mod templates;

/// Default base URL of the API, including the `/api` prefix.
pub const DEFAULT_API_URL: &str = "http://localhost:8001/api";

/// Template used by `sas task create` when none is given.
pub const DEFAULT_TEMPLATE: &str = "djcp_data";

/// Truncate `text` to at most `max` characters, marking the cut with `…`.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate("abc", 5), "abc");
        assert_eq!(truncate("abcde", 5), "abcde");
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate("是否建立数据分类分级管理制度", 6), "是否建立数…");
    }
}

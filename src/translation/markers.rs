use std::sync::LazyLock;

use regex::Regex;

pub(super) const POSITIONAL_MARKER: &str = "%s";

static NAMED_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%\(([^()\s]+)\)s").expect("named marker pattern is valid"));

pub(super) fn has_positional(sql: &str) -> bool {
    sql.contains(POSITIONAL_MARKER)
}

pub(super) fn has_named(sql: &str) -> bool {
    NAMED_MARKER.is_match(sql)
}

pub(super) fn named_marker(key: &str) -> String {
    format!("%({key})s")
}

/// Names of the `%(name)s` markers still present in `sql`, in order of appearance.
pub(super) fn remaining_named(sql: &str) -> Vec<&str> {
    NAMED_MARKER
        .captures_iter(sql)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;

static VERSION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+\.\d+\.\d+)").unwrap()
});

/// Pull the first `x.y.z` version out of a tool's `--version` output.
///
/// # Examples
/// ```
/// use gen_cli::ai::version::parse_version;
///
/// assert_eq!(parse_version("gh version 2.63.0 (2024-11-27)"), Some("2.63.0"));
/// assert_eq!(parse_version("no version here"), None);
/// ```
pub fn parse_version(output: &str) -> Option<&str> {
    VERSION_REGEX
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Compare dotted numeric versions component by component.
///
/// Missing components count as 0, so `"2.0"` equals `"2.0.0"`.
/// Non-numeric components also count as 0.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let parse = |v: &str| -> Vec<u64> {
        v.split('.')
            .map(|part| part.trim().parse::<u64>().unwrap_or(0))
            .collect()
    };

    let a_parts = parse(a);
    let b_parts = parse(b);
    let len = a_parts.len().max(b_parts.len());

    for i in 0..len {
        let a_part = a_parts.get(i).copied().unwrap_or(0);
        let b_part = b_parts.get(i).copied().unwrap_or(0);

        match a_part.cmp(&b_part) {
            Ordering::Equal => continue,
            other => return other,
        }
    }

    Ordering::Equal
}

/// `true` if `found >= minimum`.
pub fn meets_minimum(found: &str, minimum: &str) -> bool {
    compare_versions(found, minimum) != Ordering::Less
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_numeric_not_lexical() {
        assert_eq!(compare_versions("1.2.0", "1.10.0"), Ordering::Less);
        assert_eq!(compare_versions("1.10.0", "1.2.0"), Ordering::Greater);
    }

    #[test]
    fn test_compare_equal() {
        assert_eq!(compare_versions("1.0.0", "1.0.0"), Ordering::Equal);
        assert_eq!(compare_versions("2.0", "2.0.0"), Ordering::Equal);
    }

    #[test]
    fn test_compare_missing_components() {
        assert_eq!(compare_versions("2.0", "1.9.9"), Ordering::Greater);
        assert_eq!(compare_versions("1", "1.0.1"), Ordering::Less);
    }

    #[test]
    fn test_parse_version_first_match() {
        assert_eq!(parse_version("0.1.5\n"), Some("0.1.5"));
        assert_eq!(parse_version("gemini 1.2.3 (node 20.1.0)"), Some("1.2.3"));
        assert_eq!(parse_version("version 2.1"), None);
    }

    #[test]
    fn test_meets_minimum() {
        assert!(meets_minimum("1.0.0", "1.0.0"));
        assert!(meets_minimum("2.63.0", "2.0.0"));
        assert!(!meets_minimum("0.9.12", "1.0.0"));
    }
}

//! Splitting signed strings back into their parts.
//!
//! No escaping is ever applied on the way in, so parsing has to pick split
//! points that a legitimate payload cannot disturb:
//!
//! * the authenticator is split off at the _rightmost_ separator, since the
//!   authenticator is fixed-format hex and the payload sits to its left;
//! * the prefix is the _longest_ configured prefix that literally starts the
//!   frame, so `"A-"` never swallows part of `"AB-"`.

/// Split `signed` around the last occurrence of `separator`.
///
/// Returns `None` when the separator does not occur at all.
pub(crate) fn cut_last<'a>(signed: &'a str, separator: &str) -> Option<(&'a str, &'a str)> {
    signed.rsplit_once(separator)
}

/// Strip the longest matching prefix from `frame`.
///
/// Returns the remainder together with the index of the chosen prefix in
/// `prefixes`. Among prefixes of equal length the earliest one wins.
pub(crate) fn cut_longest_prefix<'a, 'p, I>(frame: &'a str, prefixes: I) -> Option<(&'a str, usize)>
where
    I: IntoIterator<Item = &'p String>,
{
    let mut best: Option<(&'a str, usize, usize)> = None;

    for (index, prefix) in prefixes.into_iter().enumerate() {
        if let Some(rest) = frame.strip_prefix(prefix.as_str()) {
            if best.map_or(true, |(_, _, len)| prefix.len() > len) {
                best = Some((rest, index, prefix.len()));
            }
        }
    }

    best.map(|(rest, index, _)| (rest, index))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(xs: &[&str]) -> Vec<String> {
        xs.iter().map(|x| x.to_string()).collect()
    }

    #[test]
    fn test_cut_last_uses_rightmost_separator() {
        assert_eq!(cut_last("a-b-c", "-"), Some(("a-b", "c")));
        assert_eq!(cut_last("a :: b :: c", " :: "), Some(("a :: b", "c")));
    }

    #[test]
    fn test_cut_last_missing_separator() {
        assert_eq!(cut_last("abc", "-"), None);
        assert_eq!(cut_last("", "-"), None);
    }

    #[test]
    fn test_cut_last_trailing_separator() {
        assert_eq!(cut_last("abc-", "-"), Some(("abc", "")));
        assert_eq!(cut_last("-", "-"), Some(("", "")));
    }

    #[test]
    fn test_longest_prefix_wins() {
        let prefixes = strings(&["A-", "AB-"]);
        assert_eq!(cut_longest_prefix("AB-x", &prefixes), Some(("x", 1)));
        assert_eq!(cut_longest_prefix("A-x", &prefixes), Some(("x", 0)));
    }

    #[test]
    fn test_longest_prefix_independent_of_order() {
        let prefixes = strings(&["AB-", "A-"]);
        assert_eq!(cut_longest_prefix("AB-x", &prefixes), Some(("x", 0)));
    }

    #[test]
    fn test_empty_prefix_matches_everything() {
        let prefixes = strings(&["TOKEN-", ""]);
        assert_eq!(cut_longest_prefix("foo", &prefixes), Some(("foo", 1)));
        assert_eq!(cut_longest_prefix("TOKEN-foo", &prefixes), Some(("foo", 0)));
    }

    #[test]
    fn test_equal_length_prefers_first() {
        let prefixes = strings(&["X", "X"]);
        assert_eq!(cut_longest_prefix("Xy", &prefixes), Some(("y", 0)));
    }

    #[test]
    fn test_no_prefix_matches() {
        let prefixes = strings(&["TOKEN-"]);
        assert_eq!(cut_longest_prefix("foo", &prefixes), None);
    }
}

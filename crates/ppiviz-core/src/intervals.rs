//! Residue Ranges
//!
//! Closed integer intervals and their compact `"a-b,c"` text form.
use itertools::Itertools;

/// Closed, inclusive `(start, end)` residue interval.
pub type Interval = (i64, i64);

/// Sorts by start and merges overlapping or touching intervals.
///
/// ```
/// use ppiviz_core::merge_intervals;
/// assert_eq!(merge_intervals(&[(1, 3), (2, 5), (7, 9)]), vec![(1, 5), (7, 9)]);
/// assert_eq!(merge_intervals(&[(1, 2), (3, 4)]), vec![(1, 4)]);
/// ```
pub fn merge_intervals(intervals: &[Interval]) -> Vec<Interval> {
    intervals
        .iter()
        .copied()
        .sorted_by_key(|&(start, _)| start)
        .coalesce(|current, next| {
            if next.0 <= current.1.saturating_add(1) {
                Ok((current.0, current.1.max(next.1)))
            } else {
                Err((current, next))
            }
        })
        .collect()
}

/// Parses `"5,10-12, 20"` into `[(5, 5), (10, 12), (20, 20)]`.
///
/// Tokens that are not a number or a `start-end` pair are skipped.
pub fn parse_range_string(text: &str) -> Vec<Interval> {
    text.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter_map(parse_range_token)
        .collect()
}

fn parse_range_token(token: &str) -> Option<Interval> {
    match token.split_once('-') {
        Some((start, end)) => {
            let start: i64 = start.trim().parse().ok()?;
            let end: i64 = end.trim().parse().ok()?;
            Some((start.min(end), start.max(end)))
        }
        None => {
            let single: i64 = token.parse().ok()?;
            Some((single, single))
        }
    }
}

/// Collapses residue indices into maximal consecutive runs.
///
/// ```
/// use ppiviz_core::indices_to_ranges;
/// assert_eq!(indices_to_ranges(&[8, 1, 2, 3, 5, 7, 2]), "1-3,5,7-8");
/// ```
pub fn indices_to_ranges(indices: &[i64]) -> String {
    indices
        .iter()
        .copied()
        .sorted()
        .dedup()
        .map(|index| (index, index))
        .coalesce(|run, (next, _)| {
            if next == run.1 + 1 {
                Ok((run.0, next))
            } else {
                Err((run, (next, next)))
            }
        })
        .map(|(start, end)| {
            if start == end {
                start.to_string()
            } else {
                format!("{}-{}", start, end)
            }
        })
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_intervals() {
        assert_eq!(
            merge_intervals(&[(1, 3), (2, 5), (7, 9)]),
            vec![(1, 5), (7, 9)]
        );
        assert_eq!(merge_intervals(&[(1, 2), (3, 4)]), vec![(1, 4)]);
        assert_eq!(
            merge_intervals(&[(20, 30), (1, 4), (22, 25)]),
            vec![(1, 4), (20, 30)]
        );
        assert!(merge_intervals(&[]).is_empty());
    }

    #[test]
    fn test_merge_intervals_at_upper_bound() {
        assert_eq!(
            merge_intervals(&[(i64::MAX - 1, i64::MAX), (5, 9), (i64::MAX, i64::MAX)]),
            vec![(5, 9), (i64::MAX - 1, i64::MAX)]
        );
    }

    #[test]
    fn test_parse_range_string() {
        assert_eq!(
            parse_range_string("5,10-12, 20"),
            vec![(5, 5), (10, 12), (20, 20)]
        );
        assert_eq!(
            parse_range_string("x-y,3, ,7-9"),
            vec![(3, 3), (7, 9)]
        );
        assert!(parse_range_string("").is_empty());
    }

    #[test]
    fn test_indices_to_ranges() {
        assert_eq!(indices_to_ranges(&[1, 2, 3, 5, 7, 8]), "1-3,5,7-8");
        assert_eq!(indices_to_ranges(&[4]), "4");
        assert_eq!(indices_to_ranges(&[]), "");
    }

    #[test]
    fn test_ranges_text_survives_reparse() {
        let text = indices_to_ranges(&[10, 11, 12, 40]);
        assert_eq!(parse_range_string(&text), vec![(10, 12), (40, 40)]);
    }
}

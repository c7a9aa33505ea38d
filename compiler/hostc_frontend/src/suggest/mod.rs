//! "Did you mean?" candidates for misspelled names.
//!
//! Levenshtein distance with a threshold that grows with the length of the
//! misspelled name, so that one-letter names do not "correct" to any other
//! one-letter name.

/// Minimum number of single-character edits turning `a` into `b`.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    bounded_distance(&a, &b, usize::MAX).unwrap_or(usize::MAX)
}

/// Edit distance between `a` and `b`, or `None` once it must exceed `limit`.
///
/// Keeps one row of the distance table; `diagonal` holds the entry the
/// current cell would have overwritten.
fn bounded_distance(a: &[char], b: &[char], limit: usize) -> Option<usize> {
    if a.len().abs_diff(b.len()) > limit {
        return None;
    }
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, &a_char) in a.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        let mut row_min = row[0];
        for (j, &b_char) in b.iter().enumerate() {
            let substitute = diagonal + usize::from(a_char != b_char);
            diagonal = row[j + 1];
            row[j + 1] = substitute.min(row[j] + 1).min(diagonal + 1);
            row_min = row_min.min(row[j + 1]);
        }
        if row_min > limit {
            return None;
        }
    }
    row.last().copied().filter(|&distance| distance <= limit)
}

/// Edits allowed for a name of `len` characters.
fn threshold(len: usize) -> usize {
    match len {
        0 | 1 => 0,
        2..=4 => 1,
        5..=8 => 2,
        n => (n / 3).min(4),
    }
}

/// Closest candidate within the threshold for `name`.
///
/// Ties keep the candidate seen first; an exact match is never suggested.
pub fn suggest_similar<'a>(
    name: &str,
    candidates: impl IntoIterator<Item = &'a str>,
) -> Option<&'a str> {
    let limit = threshold(name.chars().count());
    if limit == 0 {
        return None;
    }

    let name: Vec<char> = name.chars().collect();
    let mut best: Option<(&str, usize)> = None;
    for candidate in candidates {
        let chars: Vec<char> = candidate.chars().collect();
        if chars == name {
            continue;
        }
        // Later candidates must beat the current best outright.
        let bound = best.map_or(limit, |(_, distance)| distance - 1);
        if let Some(distance) = bounded_distance(&name, &chars, bound) {
            best = Some((candidate, distance));
            if distance == 1 {
                break;
            }
        }
    }
    best.map(|(candidate, _)| candidate)
}

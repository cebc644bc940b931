// Cell text handling: the keystroke filter and read-time coercion.
//
// Cells hold raw text. The filter runs on the whole text after every edit;
// coercion to a number only happens when the grid is read as a matrix.

/// Max characters kept for a non-negative value ("99").
pub const MAX_POSITIVE_LEN: usize = 2;
/// Max characters kept for a negative value ("-99").
pub const MAX_NEGATIVE_LEN: usize = 3;

/// Sanitize cell text after an edit.
///
/// Keeps only ASCII digits and `-`, moves a single `-` to the front if any
/// were typed, then truncates to two characters, or three when the value is
/// actually negative. `-` and `-0` are not negative, so `-00` becomes `-0`.
///
/// Magnitude is not checked: `99` and `-99` pass even though randomize
/// only produces values in [-10, 10].
pub fn filter_cell_input(raw: &str) -> String {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-')
        .collect();

    let value = if kept.contains('-') {
        let digits: String = kept.chars().filter(|c| *c != '-').collect();
        format!("-{}", digits)
    } else {
        kept
    };

    let limit = if is_negative(&value) { MAX_NEGATIVE_LEN } else { MAX_POSITIVE_LEN };
    value.chars().take(limit).collect()
}

/// True when `value` is a minus sign followed by digits that are not all zero.
fn is_negative(value: &str) -> bool {
    match value.strip_prefix('-') {
        Some(digits) => digits.chars().any(|c| c.is_ascii_digit() && c != '0'),
        None => false,
    }
}

/// Read a cell as an integer. Empty or unparsable text reads as 0.
pub fn coerce_cell(text: &str) -> i64 {
    text.trim().parse::<i64>().unwrap_or(0)
}

use unicode_width::UnicodeWidthStr;

/// Display width of a string, accounting for wide glyphs.
pub(crate) fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Right-align `s` in `width` display columns. Longer strings are returned as-is.
pub(crate) fn pad_left(s: &str, width: usize) -> String {
    let sw = display_width(s);
    if sw >= width {
        s.to_string()
    } else {
        format!("{}{}", " ".repeat(width - sw), s)
    }
}

/// Center `s` in `width` display columns, extra space going to the right.
pub(crate) fn pad_center(s: &str, width: usize) -> String {
    let sw = display_width(s);
    if sw >= width {
        return s.to_string();
    }
    let left = (width - sw) / 2;
    let right = width - sw - left;
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(right))
}

/// Convert column index to letter (0 -> A, 1 -> B, 26 -> AA, etc.)
pub(crate) fn col_to_letter(col: usize) -> String {
    let mut result = String::new();
    let mut n = col;
    loop {
        result.insert(0, (b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    result
}

/// Spreadsheet-style label for a zero-based cell position ("A1", "C4").
pub(crate) fn cell_label(row: usize, col: usize) -> String {
    format!("{}{}", col_to_letter(col), row + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_width_ascii() {
        assert_eq!(display_width("-10"), 3);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn display_width_symbols() {
        assert_eq!(display_width("\u{00b7}"), 1); // middle dot
    }

    #[test]
    fn pad_left_numbers() {
        assert_eq!(pad_left("-3", 5), "   -3");
        assert_eq!(pad_left("12345", 3), "12345");
    }

    #[test]
    fn pad_center_odd_space() {
        assert_eq!(pad_center("ab", 5), " ab  ");
        assert_eq!(pad_center("abc", 3), "abc");
    }

    #[test]
    fn col_letters() {
        assert_eq!(col_to_letter(0), "A");
        assert_eq!(col_to_letter(9), "J");
        assert_eq!(col_to_letter(25), "Z");
        assert_eq!(col_to_letter(26), "AA");
    }

    #[test]
    fn cell_labels() {
        assert_eq!(cell_label(0, 0), "A1");
        assert_eq!(cell_label(9, 9), "J10");
    }
}

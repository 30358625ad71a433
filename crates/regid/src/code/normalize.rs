use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Splits a native name into uppercase ASCII-folded words.
///
/// Applies, in order:
/// - canonical decomposition (NFD) with combining marks dropped
/// - `đ`/`Đ` folded to `d`/`D` (the stroke is not a combining mark)
/// - removal of everything that is neither a letter nor whitespace
/// - trimming and uppercasing
///
/// ```
/// use regid::normalize_words;
///
/// assert_eq!(normalize_words("Đắk Lắk"), ["DAK", "LAK"]);
/// assert_eq!(normalize_words("Bà Rịa - Vũng Tàu"), ["BA", "RIA", "VUNG", "TAU"]);
/// ```
pub fn normalize_words(name: &str) -> Vec<String> {
    let folded: String = name
        .nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .map(fold_stroke)
        .filter(|ch| ch.is_alphabetic() || ch.is_whitespace())
        .collect();

    folded
        .trim()
        .to_uppercase()
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}

const fn fold_stroke(ch: char) -> char {
    match ch {
        'đ' => 'd',
        'Đ' => 'D',
        other => other,
    }
}

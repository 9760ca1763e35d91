// Query normalization applied to user input and lexicon keys alike

/// Normalize input text: trim surrounding whitespace and lowercase
///
/// Internal whitespace is kept and no transliteration happens, so
/// `"Nhật Bản"` becomes `"nhật bản"` and kana input passes through untouched.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

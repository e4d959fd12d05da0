//! Various utility functions

use wana_kana::ConvertJapanese;

/// Repeats the previous kanji, as in 日々.
pub const ITERATION_MARK: &str = "々";

pub fn is_katakana(c: char) -> bool {
    (0x30A0..=0x30FF).contains(&(c as u32))
}

/// Splits a text into its symbols, one `&str` per character.
pub fn symbols(text: &str) -> impl Iterator<Item = &str> + Clone {
    text.char_indices()
        .map(move |(i, c)| &text[i..i + c.len_utf8()])
}

pub fn is_single_symbol(text: &str) -> bool {
    let mut chars = text.chars();
    chars.next().is_some() && chars.next().is_none()
}

/// Converts katakana in a reading to hiragana so that on'yomi written as ダイ match だい.
/// Readings without katakana are returned as they are.
pub fn normalize_reading(reading: &str) -> String {
    if reading.chars().any(is_katakana) {
        reading.to_hiragana()
    } else {
        reading.to_string()
    }
}

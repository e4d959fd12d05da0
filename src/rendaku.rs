//! Rendaku: the first sound of a non-initial part of a compound may become voiced,
//! as in 花 (はな) + 火 (ひ) = 花火 (はなび).

/// Unvoiced prefixes and the prefixes they can turn into.
/// Both single morae and morae followed by ん are listed; ん-prefixes are where the
/// half-voiced p-sounds appear (e.g. 一本 いっぽん).
pub const RENDAKU_TABLE: &[(&str, &[&str])] = &[
    // ka
    ("か", &["が"]),
    ("き", &["ぎ"]),
    ("く", &["ぐ"]),
    ("け", &["げ"]),
    ("こ", &["ご"]),
    // sa
    ("さ", &["ざ"]),
    ("し", &["じ"]),
    ("す", &["ず"]),
    ("せ", &["ぜ"]),
    ("そ", &["ぞ"]),
    // ta
    ("た", &["だ"]),
    ("ち", &["ぢ"]),
    ("つ", &["づ"]),
    ("て", &["で"]),
    ("と", &["ど"]),
    // ha
    ("は", &["ば"]),
    ("ひ", &["び"]),
    ("ふ", &["ぶ"]),
    ("へ", &["べ"]),
    ("ほ", &["ぼ"]),
    // ha with ん
    ("はん", &["ぱん"]),
    ("ひん", &["ぴん"]),
    ("ふん", &["ぷん"]),
    ("へん", &["ぺん"]),
    ("ほん", &["ぽん"]),
];

/// Returns the reading followed by every variant obtained by voicing its start.
/// The reading itself is always the first element and there are no duplicates.
pub fn expand(reading: &str) -> Vec<String> {
    let mut variants = vec![reading.to_string()];
    for &(prefix, voiced) in RENDAKU_TABLE {
        let Some(rest) = reading.strip_prefix(prefix) else {
            continue;
        };
        for voiced_prefix in voiced {
            let variant = format!("{voiced_prefix}{rest}");
            if !variants.contains(&variant) {
                variants.push(variant);
            }
        }
    }
    variants
}

/// Expands every reading of a list, keeping the order and dropping duplicates.
pub fn expand_all(readings: &[String]) -> Vec<String> {
    let mut expanded: Vec<String> = vec![];
    for reading in readings {
        for variant in expand(reading) {
            if !expanded.contains(&variant) {
                expanded.push(variant);
            }
        }
    }
    expanded
}

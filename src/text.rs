//! Cell text normalization.

use std::borrow::Cow;

use unicode_normalization::UnicodeNormalization;

/// Check if a character may appear in XML 1.0 character data.
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Prepare user-supplied text for a document cell.
///
/// Applies NFC normalization, folds `\r\n` and lone `\r` into `\n`, and
/// drops characters that XML 1.0 cannot carry.
pub fn normalize_cell_text(text: &str) -> String {
    let folded = text.replace("\r\n", "\n").replace('\r', "\n");
    folded.nfc().filter(|&c| is_xml_char(c)).collect()
}

/// Drop characters that XML 1.0 cannot carry, leaving everything else as is.
pub fn strip_xml_illegal(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_xml_char) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.chars().filter(|&c| is_xml_char(c)).collect())
    }
}

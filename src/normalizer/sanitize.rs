//! Free-text cleanup applied to every text value taken from a payload.

use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::expect_used)]
static BLOCK_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<\s*(br\s*/?|/p|/div|/li|/h[1-6]|/tr)\s*>").expect("valid regex")
});

#[allow(clippy::expect_used)]
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

#[allow(clippy::expect_used)]
static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]{2,8});").expect("valid regex")
});

#[allow(clippy::expect_used)]
static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t]*\n(?:[ \t]*\n)+").expect("valid regex"));

/// Windows-1252 characters in the 0x80..=0x9F range, by byte.
const CP1252_HIGH: [(char, u8); 27] = [
    ('€', 0x80),
    ('‚', 0x82),
    ('ƒ', 0x83),
    ('„', 0x84),
    ('…', 0x85),
    ('†', 0x86),
    ('‡', 0x87),
    ('ˆ', 0x88),
    ('‰', 0x89),
    ('Š', 0x8A),
    ('‹', 0x8B),
    ('Œ', 0x8C),
    ('Ž', 0x8E),
    ('‘', 0x91),
    ('’', 0x92),
    ('“', 0x93),
    ('”', 0x94),
    ('•', 0x95),
    ('–', 0x96),
    ('—', 0x97),
    ('˜', 0x98),
    ('™', 0x99),
    ('š', 0x9A),
    ('›', 0x9B),
    ('œ', 0x9C),
    ('ž', 0x9E),
    ('Ÿ', 0x9F),
];

/// Byte a character had before being decoded as Windows-1252 or Latin-1.
fn single_byte(c: char) -> Option<u8> {
    if let Ok(byte) = u8::try_from(u32::from(c)) {
        return Some(byte);
    }
    CP1252_HIGH
        .iter()
        .find_map(|&(ch, byte)| (ch == c).then_some(byte))
}

/// Undoes one round of UTF-8 bytes being decoded as a single-byte charset.
fn repair_once(text: &str) -> Option<String> {
    // A UTF-8 lead byte shows up as one of these when mis-decoded.
    if !text.chars().any(|c| ('\u{C2}'..='\u{F4}').contains(&c)) {
        return None;
    }
    let bytes: Vec<u8> = text.chars().map(single_byte).collect::<Option<_>>()?;
    let repaired = String::from_utf8(bytes).ok()?;
    (repaired != text).then_some(repaired)
}

/// Repairs text whose UTF-8 bytes were decoded as Latin-1 or Windows-1252,
/// possibly twice.
#[must_use]
pub fn fix_mojibake(text: &str) -> String {
    let mut current = text.to_string();
    for _ in 0..2 {
        match repair_once(&current) {
            Some(repaired) => current = repaired,
            None => break,
        }
    }
    current
}

/// Repairs encoding, normalizes line ends, drops control characters and trims.
#[must_use]
pub fn sanitize_text(text: &str) -> String {
    let repaired = fix_mojibake(text);
    let unified = repaired.replace("\r\n", "\n").replace('\r', "\n");
    let cleaned: String = unified
        .chars()
        .filter(|&c| c == '\n' || c == '\t' || !c.is_control())
        .collect();
    cleaned.trim().to_string()
}

fn decode_entity(entity: &str) -> Option<char> {
    if let Some(number) = entity.strip_prefix('#') {
        let code = match number.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => number.parse().ok()?,
        };
        return char::from_u32(code);
    }
    let c = match entity {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        "ndash" => '–',
        "mdash" => '—',
        "hellip" => '…',
        "copy" => '©',
        "reg" => '®',
        "deg" => '°',
        _ => return None,
    };
    Some(c)
}

/// Turns an HTML fragment into plain text, then sanitizes it.
#[must_use]
pub fn strip_html(html: &str) -> String {
    let with_breaks = BLOCK_BREAK.replace_all(html, "\n");
    let without_tags = TAG.replace_all(&with_breaks, "");
    let decoded = ENTITY.replace_all(&without_tags, |caps: &regex::Captures<'_>| {
        decode_entity(&caps[1]).map_or_else(|| caps[0].to_string(), String::from)
    });
    let text = sanitize_text(&decoded);
    BLANK_LINES.replace_all(&text, "\n\n").into_owned()
}

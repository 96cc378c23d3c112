//! Derived text metrics shown next to every document.

/// Average adult silent-reading speed used for reading-time estimates.
pub const WORDS_PER_MINUTE: u32 = 200;

/// Separators between words: ASCII space, tab, line feed, vertical tab,
/// form feed and carriage return. Unicode spaces such as U+00A0 are part of
/// a word.
fn is_word_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

/// Whitespace for blank detection. Non-breaking spaces do not count.
fn is_blank_char(c: char) -> bool {
    c.is_whitespace() && !matches!(c, '\u{00A0}' | '\u{2007}' | '\u{202F}')
}

/// Count words separated by runs of ASCII whitespace.
///
/// Blank input (empty or whitespace only) has zero words.
pub fn count_words(content: &str) -> u32 {
    if content.chars().all(is_blank_char) {
        return 0;
    }
    content
        .split(is_word_separator)
        .filter(|word| !word.is_empty())
        .count() as u32
}

/// Estimate reading time in whole minutes, rounding up.
pub fn estimate_reading_time_minutes(words: u32) -> u32 {
    if words == 0 {
        return 0;
    }
    words.div_ceil(WORDS_PER_MINUTE)
}

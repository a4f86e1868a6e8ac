//! Derived text statistics.

/// Character, word, line and paragraph counts for a piece of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Statistics {
    pub characters: usize,
    pub words: usize,
    pub lines: usize,
    pub paragraphs: usize,
}

impl Statistics {
    /// Computes statistics for `text`.
    ///
    /// Lines are newline-delimited segments, so `""` has one line and a
    /// trailing newline adds an empty last line. Paragraphs are blocks of
    /// text separated by one or more whitespace-only lines.
    ///
    /// Words and paragraph breaks are delimited by ASCII whitespace only,
    /// so a no-break space joins two words.
    pub fn compute(text: &str) -> Self {
        Self {
            characters: text.chars().count(),
            words: text.split(is_separator).filter(|w| !w.is_empty()).count(),
            lines: text.split('\n').count(),
            paragraphs: count_paragraphs(text),
        }
    }
}

/// ASCII whitespace, including vertical tab.
fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

fn count_paragraphs(text: &str) -> usize {
    let mut paragraphs = 0;
    let mut has_content = false;
    for line in text.split('\n') {
        if line.chars().all(is_separator) {
            if has_content {
                paragraphs += 1;
            }
            has_content = false;
        } else if line.chars().any(|c| !c.is_whitespace()) {
            has_content = true;
        }
    }
    if has_content {
        paragraphs += 1;
    }
    paragraphs
}

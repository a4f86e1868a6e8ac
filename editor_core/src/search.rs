//! Search and replace functionality.
//!
//! All offsets are character indices into the buffer text.

/// Query and matching rules for a search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Text to look for.
    pub query: String,
    /// Text substituted by the replace operations.
    pub replacement: String,
    /// Whether letter case must match exactly.
    pub case_sensitive: bool,
    /// Whether matches must not touch a letter or digit on either side.
    pub whole_word: bool,
    /// Stored for the presentation layer. Matching is always literal.
    pub regex: bool,
}

impl SearchOptions {
    /// Creates options for a case-insensitive literal search.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// Sets the replacement text.
    pub fn with_replacement(mut self, replacement: impl Into<String>) -> Self {
        self.replacement = replacement.into();
        self
    }

    /// Sets case sensitivity.
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Sets whole-word matching.
    pub fn whole_word(mut self, whole_word: bool) -> Self {
        self.whole_word = whole_word;
        self
    }

    /// Returns the length of the query in characters.
    pub fn query_len(&self) -> usize {
        self.query.chars().count()
    }
}

fn chars_match(a: char, b: char, case_sensitive: bool) -> bool {
    a == b || (!case_sensitive && a.to_lowercase().eq(b.to_lowercase()))
}

/// Returns the first index at or after `from` where `needle` occurs.
fn index_of(
    haystack: &[char],
    needle: &[char],
    from: usize,
    case_sensitive: bool,
) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    (from..=haystack.len() - needle.len()).find(|&start| {
        haystack[start..start + needle.len()]
            .iter()
            .zip(needle)
            .all(|(&a, &b)| chars_match(a, b, case_sensitive))
    })
}

fn is_word_char(text: &[char], idx: usize) -> bool {
    text.get(idx).is_some_and(|c| c.is_alphanumeric())
}

/// Finds the start offsets of all matches of `options.query` in `text`.
///
/// Matches are ascending and never overlap. A candidate rejected by the
/// whole-word rule only advances the scan by one character, so a later
/// candidate overlapping it can still be accepted.
pub fn find(text: &str, options: &SearchOptions) -> Vec<usize> {
    let mut matches = Vec::new();
    if options.query.is_empty() {
        return matches;
    }

    let haystack: Vec<char> = text.chars().collect();
    let needle: Vec<char> = options.query.chars().collect();

    let mut start = 0;
    while let Some(pos) = index_of(&haystack, &needle, start, options.case_sensitive) {
        let end = pos + needle.len();
        if options.whole_word
            && ((pos > 0 && is_word_char(&haystack, pos - 1)) || is_word_char(&haystack, end))
        {
            start = pos + 1;
            continue;
        }
        matches.push(pos);
        start = end;
    }

    matches
}

/// Replaces every non-overlapping occurrence of `query`, scanning left to right.
/// An empty query leaves the text unchanged.
pub fn replace_all(text: &str, query: &str, replacement: &str, case_sensitive: bool) -> String {
    if query.is_empty() {
        return text.to_string();
    }

    let haystack: Vec<char> = text.chars().collect();
    let needle: Vec<char> = query.chars().collect();

    let mut result = String::with_capacity(text.len());
    let mut copied = 0;
    while let Some(pos) = index_of(&haystack, &needle, copied, case_sensitive) {
        result.extend(&haystack[copied..pos]);
        result.push_str(replacement);
        copied = pos + needle.len();
    }
    result.extend(&haystack[copied..]);
    result
}

/// Search session: options, results and the current match.
#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    /// The current options.
    options: SearchOptions,
    /// Start offsets of all matches.
    results: Vec<usize>,
    /// Index into `results` of the current match.
    current: Option<usize>,
    /// Whether the search panel is shown.
    visible: bool,
}

impl SearchSession {
    /// Creates a new hidden session with no query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current options.
    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Returns the start offsets of all matches.
    pub fn results(&self) -> &[usize] {
        &self.results
    }

    /// Returns the index of the current match within the results.
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Returns the start offset of the current match.
    pub fn current_position(&self) -> Option<usize> {
        self.current.and_then(|i| self.results.get(i).copied())
    }

    /// Returns true if the query is non-empty.
    pub fn is_active(&self) -> bool {
        !self.options.query.is_empty()
    }

    /// Returns whether the search panel is shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Replaces the options and searches `text` from scratch.
    pub fn set_options(&mut self, options: SearchOptions, text: &str) {
        self.options = options;
        self.search(text);
    }

    /// Searches `text` from scratch. The first match becomes current.
    pub fn search(&mut self, text: &str) {
        self.results = find(text, &self.options);
        self.current = if self.results.is_empty() { None } else { Some(0) };
    }

    /// Updates the results after the text has changed, keeping the
    /// current match near where it was.
    pub fn refresh(&mut self, text: &str) {
        let old_position = self.current_position();
        self.search(text);
        if let Some(position) = old_position {
            self.find_nearest(position);
        }
    }

    /// Makes the first match at or after `position` current, wrapping to
    /// the first match if there is none.
    pub fn find_nearest(&mut self, position: usize) -> Option<usize> {
        if self.results.is_empty() {
            return None;
        }
        let idx = self
            .results
            .iter()
            .position(|&start| start >= position)
            .unwrap_or(0);
        self.current = Some(idx);
        Some(self.results[idx])
    }

    /// Moves to the next match, wrapping around.
    /// Returns the new current match position if any.
    pub fn next_match(&mut self) -> Option<usize> {
        if self.results.is_empty() {
            return None;
        }
        let next = match self.current {
            Some(i) => (i + 1) % self.results.len(),
            None => 0,
        };
        self.current = Some(next);
        Some(self.results[next])
    }

    /// Moves to the previous match, wrapping around.
    /// Returns the new current match position if any.
    pub fn prev_match(&mut self) -> Option<usize> {
        if self.results.is_empty() {
            return None;
        }
        let prev = match self.current {
            Some(i) if i > 0 => i - 1,
            _ => self.results.len() - 1,
        };
        self.current = Some(prev);
        Some(self.results[prev])
    }

    /// Flips panel visibility. Hiding drops the results.
    /// Returns the new visibility.
    pub fn toggle_visibility(&mut self) -> bool {
        self.visible = !self.visible;
        if !self.visible {
            self.clear_results();
        }
        self.visible
    }

    /// Drops the results and the current match, keeping the options.
    pub fn clear_results(&mut self) {
        self.results.clear();
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_non_overlapping() {
        assert_eq!(find("aaaa", &SearchOptions::new("aa")), vec![0, 2]);
    }

    #[test]
    fn test_find_case_insensitive() {
        let options = SearchOptions::new("hello");
        assert_eq!(find("Hello hello", &options), vec![0, 6]);
    }

    #[test]
    fn test_find_case_sensitive() {
        let options = SearchOptions::new("hello").case_sensitive(true);
        assert_eq!(find("Hello HELLO hello", &options), vec![12]);
    }

    #[test]
    fn test_find_whole_word() {
        let options = SearchOptions::new("cat").whole_word(true);
        assert_eq!(find("cat category cat", &options), vec![0, 14]);
    }

    #[test]
    fn test_whole_word_rejection_advances_by_one() {
        // "aa" inside "aaa" is rejected twice, then the standalone "aa" matches.
        let options = SearchOptions::new("aa").whole_word(true);
        assert_eq!(find("aaa aa", &options), vec![4]);
        // Punctuation is not a word character.
        assert_eq!(find("(aa),aa.", &options), vec![1, 5]);
    }

    #[test]
    fn test_find_empty_query() {
        assert!(find("hello", &SearchOptions::default()).is_empty());
    }

    #[test]
    fn test_find_query_longer_than_text() {
        assert!(find("ab", &SearchOptions::new("abc")).is_empty());
    }

    #[test]
    fn test_find_offsets_are_char_indices() {
        assert_eq!(find("héllo héllo", &SearchOptions::new("LLO")), vec![2, 8]);
    }

    #[test]
    fn test_regex_flag_is_literal() {
        let mut options = SearchOptions::new("a.c");
        options.regex = true;
        assert_eq!(find("abc a.c", &options), vec![4]);
    }

    #[test]
    fn test_replace_all() {
        assert_eq!(replace_all("a-a-a", "a", "b", true), "b-b-b");
        assert_eq!(replace_all("Cat cat CAT", "cat", "dog", false), "dog dog dog");
        assert_eq!(replace_all("Cat cat CAT", "cat", "dog", true), "Cat dog CAT");
        assert_eq!(replace_all("aaaa", "aa", "b", true), "bb");
        assert_eq!(replace_all("abc", "", "x", true), "abc");
    }

    #[test]
    fn test_session_navigation() {
        let mut session = SearchSession::new();
        session.set_options(SearchOptions::new("a"), "a b a c a");
        assert_eq!(session.results(), &[0, 4, 8]);
        assert_eq!(session.current_index(), Some(0));

        assert_eq!(session.prev_match(), Some(8));
        assert_eq!(session.current_index(), Some(2));
        assert_eq!(session.next_match(), Some(0));
        assert_eq!(session.next_match(), Some(4));
        assert_eq!(session.current_position(), Some(4));
    }

    #[test]
    fn test_session_navigation_without_results() {
        let mut session = SearchSession::new();
        session.set_options(SearchOptions::new("xyz"), "hello");
        assert!(session.is_active());
        assert_eq!(session.current_index(), None);
        assert_eq!(session.next_match(), None);
        assert_eq!(session.prev_match(), None);
        assert_eq!(session.current_index(), None);
    }

    #[test]
    fn test_refresh_keeps_nearest() {
        let mut session = SearchSession::new();
        session.set_options(SearchOptions::new("a"), "a  a  a");
        session.next_match();
        assert_eq!(session.current_position(), Some(3));

        // The first match at or after the old offset becomes current.
        session.refresh("  a  a");
        assert_eq!(session.results(), &[2, 5]);
        assert_eq!(session.current_position(), Some(5));
        assert_eq!(session.current_index(), Some(1));
    }

    #[test]
    fn test_hiding_clears_results() {
        let mut session = SearchSession::new();
        assert!(session.toggle_visibility());
        session.set_options(SearchOptions::new("a"), "aaa");
        assert_eq!(session.results().len(), 3);

        assert!(!session.toggle_visibility());
        assert!(session.results().is_empty());
        assert_eq!(session.current_index(), None);
        assert_eq!(session.options().query, "a");
    }
}

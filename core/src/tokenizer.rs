use std::collections::HashSet;

/// Set of normalized words that are never indexed.
///
/// Words are stored trimmed and lower-cased; lookups lower-case the probe, so
/// membership is case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct Stoplist {
    words: HashSet<String>,
}

impl Stoplist {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&mut self, word: &str) {
        let word = normalize(word);
        if !word.is_empty() {
            self.words.insert(word);
        }
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.words.contains(&normalize(token))
    }

    /// Lookup for a token already produced by [`normalize`].
    pub(crate) fn contains_normalized(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize { self.words.len() }

    pub fn is_empty(&self) -> bool { self.words.is_empty() }
}

impl<S: AsRef<str>> FromIterator<S> for Stoplist {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut stoplist = Stoplist::new();
        for word in iter {
            stoplist.insert(word.as_ref());
        }
        stoplist
    }
}

/// Trim and lower-case a token. No stemming or punctuation stripping.
pub fn normalize(token: &str) -> String {
    token.trim().to_lowercase()
}

/// Split a line on whitespace into normalized tokens.
pub fn tokenize_line(line: &str) -> impl Iterator<Item = String> + '_ {
    line.split_whitespace().map(normalize)
}

//! Numeric-aware string keys.
//!
//! A string is split into maximal runs of ASCII digits and non-digits. Digit
//! runs compare by integer value, other runs as plain strings, so `file2`
//! sorts before `file10`.

use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chunk {
    /// Digit run with leading zeros stripped
    Number(String),
    Text(String),
}

impl Ord for Chunk {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            // Without leading zeros, a longer run is a larger number
            (Chunk::Number(a), Chunk::Number(b)) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
            (Chunk::Text(a), Chunk::Text(b)) => a.cmp(b),
            (Chunk::Number(_), Chunk::Text(_)) => Ordering::Less,
            (Chunk::Text(_), Chunk::Number(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for Chunk {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Chunk sequence compared element by element; on a common prefix the
/// shorter key sorts first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct NumericKey(pub Vec<Chunk>);

impl NumericKey {
    pub fn parse(text: &str) -> Self {
        let mut chunks = Vec::new();
        let mut current = String::new();
        let mut in_digits = false;

        for ch in text.chars() {
            let digit = ch.is_ascii_digit();
            if !current.is_empty() && digit != in_digits {
                chunks.push(Self::finish(std::mem::take(&mut current), in_digits));
            }
            in_digits = digit;
            current.push(ch);
        }
        if !current.is_empty() {
            chunks.push(Self::finish(current, in_digits));
        }
        Self(chunks)
    }

    fn finish(run: String, digits: bool) -> Chunk {
        if digits {
            let trimmed = run.trim_start_matches('0');
            Chunk::Number(if trimmed.is_empty() {
                "0".to_string()
            } else {
                trimmed.to_string()
            })
        } else {
            Chunk::Text(run)
        }
    }
}

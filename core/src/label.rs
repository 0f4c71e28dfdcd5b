use crate::query::LABEL_LEN;
use std::fmt;

const ALPHABET: &[u8; 26] = b"abcdefghijklmnopqrstuvwxyz";

/// Number of distinct labels before allocation wraps around.
pub const LABEL_SPACE: usize = ALPHABET.len().pow(LABEL_LEN as u32);

/// Fixed-length lowercase label attached to a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Label(String);

impl Label {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Leading `len` characters, or the whole label when it is shorter.
    pub fn prefix(&self, len: usize) -> &str {
        // Labels are ASCII so byte and char offsets agree.
        &self.0[..len.min(self.0.len())]
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Deterministic base-26 label generator.
///
/// The ordinal is written least-significant digit first, so consecutive
/// ordinals differ in the leading character: 0 -> `aa`, 1 -> `ba`,
/// 26 -> `ab`. Ordinals past [`LABEL_SPACE`] reuse earlier labels.
pub struct LabelAllocator;

impl LabelAllocator {
    pub fn label(ordinal: usize) -> Label {
        let base = ALPHABET.len();
        let mut rest = ordinal;
        let mut label = String::with_capacity(LABEL_LEN);
        for _ in 0..LABEL_LEN {
            label.push(char::from(ALPHABET[rest % base]));
            rest /= base;
        }
        Label(label)
    }
}

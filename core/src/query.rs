/// Shortest query that starts a scan.
pub const MIN_SEARCH_LEN: usize = 1;
/// Leading query characters that pick what to search for.
pub const ANCHOR_LEN: usize = 2;
/// Characters covered by a candidate, counted from the anchor occurrence.
pub const CONTEXT_LEN: usize = 4;
pub const LABEL_LEN: usize = CONTEXT_LEN - ANCHOR_LEN;

/// The live query split into anchor and discriminator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Query {
    anchor: String,
    discriminator: String,
    len: usize,
}

impl Query {
    pub fn parse(text: &str) -> Self {
        let split = text
            .char_indices()
            .nth(ANCHOR_LEN)
            .map_or(text.len(), |(idx, _)| idx);
        let (anchor, discriminator) = text.split_at(split);
        Self {
            anchor: anchor.to_string(),
            discriminator: discriminator.to_string(),
            len: text.chars().count(),
        }
    }

    pub fn anchor(&self) -> &str {
        &self.anchor
    }

    pub fn discriminator(&self) -> &str {
        &self.discriminator
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_searchable(&self) -> bool {
        self.len >= MIN_SEARCH_LEN
    }

    /// How many label characters an overlay shows for this query.
    pub fn label_len(&self) -> usize {
        self.len.saturating_sub(ANCHOR_LEN) + 1
    }
}

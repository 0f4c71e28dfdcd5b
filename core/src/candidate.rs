use crate::host::Position;
use crate::host::TextRange;
use crate::host::ViewId;
use crate::label::Label;
use serde::Serialize;

/// Identity of one anchor occurrence: the view plus the character range of
/// its context window on a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CandidateKey {
    pub view: ViewId,
    pub line: usize,
    pub start: usize,
    pub end: usize,
}

impl CandidateKey {
    pub fn start(&self) -> Position {
        Position::new(self.line, self.start)
    }

    pub fn range(&self) -> TextRange {
        TextRange {
            start: Position::new(self.line, self.start),
            end: Position::new(self.line, self.end),
        }
    }

    pub fn is_zero_width(&self) -> bool {
        self.start == self.end
    }
}

/// A candidate as seen by the session: its identity, the label assigned in
/// the current generation, and whether an overlay is currently drawn for it.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub key: CandidateKey,
    pub label: Option<Label>,
    pub visible: bool,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Candidate {}

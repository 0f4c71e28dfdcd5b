//! Boundary between the jump engine and the editor that embeds it.
//!
//! The engine never owns views, documents or overlays. It reads them through
//! [`EditorHost`], draws labels through [`OverlayHost`] and drives focus
//! changes it cannot express directly through [`Workbench`].

use async_trait::async_trait;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ViewId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GroupId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayHandle(pub u64);

/// Identity of the document shown by a view, typically its path or URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DocumentId(pub String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Zero-based line and character column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TextRange {
    pub start: Position,
    pub end: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub start: Position,
    pub end: Position,
}

impl Selection {
    /// A zero-width selection, i.e. a plain caret.
    pub fn caret(at: Position) -> Self {
        Self { start: at, end: at }
    }

    pub fn new(start: Position, end: Position) -> Self {
        if end < start {
            Self {
                start: end,
                end: start,
            }
        } else {
            Self { start, end }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleLine {
    pub number: usize,
    pub text: String,
}

/// What a view group currently shows in its active tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabKind {
    Normal {
        document: DocumentId,
    },
    /// Two documents side by side (diff style).
    Comparison {
        original: DocumentId,
        modified: DocumentId,
    },
    Other,
}

impl TabKind {
    pub fn shows(&self, document: &DocumentId) -> bool {
        match self {
            TabKind::Normal { document: shown } => shown == document,
            TabKind::Comparison { original, modified } => {
                original == document || modified == document
            }
            TabKind::Other => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewGroup {
    pub id: GroupId,
    pub active_tab: TabKind,
}

pub trait EditorHost {
    /// Views currently on screen, in host order.
    fn visible_views(&self) -> Vec<ViewId>;

    fn active_view(&self) -> Option<ViewId>;

    /// Lines inside the view's viewport, top to bottom.
    fn visible_lines(&self, view: ViewId) -> Vec<VisibleLine>;

    fn selection(&self, view: ViewId) -> Option<Selection>;

    fn set_selection(&self, view: ViewId, selection: Selection);

    fn focus_view(&self, view: ViewId);

    /// Display column of the view, `None` when the host cannot place it
    /// (one side of a comparison view).
    fn view_column(&self, view: ViewId) -> Option<u32>;

    fn document(&self, view: ViewId) -> Option<DocumentId>;
}

pub trait OverlayHost {
    fn create_overlay(&self, view: ViewId, range: TextRange, label: &str) -> OverlayHandle;

    /// Must tolerate handles that were already disposed.
    fn dispose_overlay(&self, handle: OverlayHandle);
}

#[async_trait]
pub trait Workbench {
    fn view_groups(&self) -> Vec<ViewGroup>;

    fn active_group(&self) -> Option<GroupId>;

    /// Document of the text view that currently holds host focus.
    fn active_document(&self) -> Option<DocumentId>;

    /// Moves focus to the next view group. Resolves once the host settled.
    async fn cycle_group(&self);

    /// Flips focus between the two sides of the active comparison view.
    async fn switch_side(&self);
}

pub trait Host: EditorHost + OverlayHost + Workbench + Send + Sync {}

impl<T> Host for T where T: EditorHost + OverlayHost + Workbench + Send + Sync {}

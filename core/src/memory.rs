//! In-process [`Host`](crate::host::Host) backed by plain strings.
//!
//! Every normal view lives in its own view group. A comparison group holds two
//! views that have no display column and share focus through a switchable
//! active side, which is exactly the shape the navigator has to search.

use crate::host::DocumentId;
use crate::host::EditorHost;
use crate::host::GroupId;
use crate::host::OverlayHandle;
use crate::host::OverlayHost;
use crate::host::Selection;
use crate::host::TabKind;
use crate::host::TextRange;
use crate::host::ViewGroup;
use crate::host::ViewId;
use crate::host::VisibleLine;
use crate::host::Workbench;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedOverlay {
    pub view: ViewId,
    pub range: TextRange,
    pub label: String,
}

#[derive(Debug, Default)]
pub struct MemoryHost {
    state: Mutex<State>,
}

#[derive(Debug, Default)]
struct State {
    views: Vec<MemoryView>,
    groups: Vec<MemoryGroup>,
    active_view: Option<ViewId>,
    active_group: Option<usize>,
    overlays: BTreeMap<u64, RenderedOverlay>,
    next_overlay: u64,
    groups_pinned: bool,
    sides_pinned: bool,
    group_cycles: usize,
    side_switches: usize,
}

#[derive(Debug)]
struct MemoryView {
    id: ViewId,
    document: DocumentId,
    lines: Vec<String>,
    viewport: Option<Range<usize>>,
    selection: Selection,
    group: usize,
    column: Option<u32>,
}

#[derive(Debug)]
struct MemoryGroup {
    id: GroupId,
    kind: GroupKind,
}

#[derive(Debug)]
enum GroupKind {
    Single {
        view: ViewId,
    },
    Comparison {
        original: ViewId,
        modified: ViewId,
        modified_active: bool,
    },
}

impl GroupKind {
    fn focused_view(&self) -> ViewId {
        match self {
            GroupKind::Single { view } => *view,
            GroupKind::Comparison {
                original,
                modified,
                modified_active,
            } => {
                if *modified_active {
                    *modified
                } else {
                    *original
                }
            }
        }
    }
}

impl State {
    fn view(&self, id: ViewId) -> Option<&MemoryView> {
        self.views.iter().find(|view| view.id == id)
    }

    fn view_mut(&mut self, id: ViewId) -> Option<&mut MemoryView> {
        self.views.iter_mut().find(|view| view.id == id)
    }

    fn next_view_id(&self) -> ViewId {
        ViewId(self.views.len() as u64 + 1)
    }

    fn push_view(&mut self, document: DocumentId, text: &str, column: Option<u32>) -> ViewId {
        let id = self.next_view_id();
        let mut lines: Vec<String> = text.lines().map(str::to_string).collect();
        if lines.is_empty() {
            lines.push(String::new());
        }
        self.views.push(MemoryView {
            id,
            document,
            lines,
            viewport: None,
            selection: Selection::default(),
            group: self.groups.len(),
            column,
        });
        id
    }

    fn activate_group(&mut self, index: usize) {
        if let Some(group) = self.groups.get(index) {
            self.active_group = Some(index);
            self.active_view = Some(group.kind.focused_view());
        }
    }
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens `text` in a new group of its own. The first view opened gets focus.
    pub fn add_view(&self, document: DocumentId, text: &str) -> ViewId {
        let mut state = self.state.lock();
        let column = state.groups.len() as u32 + 1;
        let view = state.push_view(document, text, Some(column));
        let id = GroupId(state.groups.len() as u64 + 1);
        state.groups.push(MemoryGroup {
            id,
            kind: GroupKind::Single { view },
        });
        if state.active_view.is_none() {
            let index = state.groups.len() - 1;
            state.activate_group(index);
        }
        view
    }

    /// Opens a side-by-side comparison in a new group. The modified side
    /// starts out active within the group.
    pub fn add_comparison(
        &self,
        original: (DocumentId, &str),
        modified: (DocumentId, &str),
    ) -> (ViewId, ViewId) {
        let mut state = self.state.lock();
        let original_view = state.push_view(original.0, original.1, None);
        let modified_view = state.push_view(modified.0, modified.1, None);
        let id = GroupId(state.groups.len() as u64 + 1);
        state.groups.push(MemoryGroup {
            id,
            kind: GroupKind::Comparison {
                original: original_view,
                modified: modified_view,
                modified_active: true,
            },
        });
        if state.active_view.is_none() {
            let index = state.groups.len() - 1;
            state.activate_group(index);
        }
        (original_view, modified_view)
    }

    /// Restricts the visible lines of `view` to `lines` (zero-based, end exclusive).
    pub fn set_viewport(&self, view: ViewId, lines: Range<usize>) {
        if let Some(view) = self.state.lock().view_mut(view) {
            view.viewport = Some(lines);
        }
    }

    /// Makes `cycle_group` a no-op, as if something kept stealing focus.
    pub fn pin_groups(&self, pinned: bool) {
        self.state.lock().groups_pinned = pinned;
    }

    /// Makes `switch_side` a no-op.
    pub fn pin_sides(&self, pinned: bool) {
        self.state.lock().sides_pinned = pinned;
    }

    pub fn overlays(&self) -> Vec<RenderedOverlay> {
        self.state.lock().overlays.values().cloned().collect()
    }

    pub fn group_cycles(&self) -> usize {
        self.state.lock().group_cycles
    }

    pub fn side_switches(&self) -> usize {
        self.state.lock().side_switches
    }
}

impl EditorHost for MemoryHost {
    fn visible_views(&self) -> Vec<ViewId> {
        self.state.lock().views.iter().map(|view| view.id).collect()
    }

    fn active_view(&self) -> Option<ViewId> {
        self.state.lock().active_view
    }

    fn visible_lines(&self, view: ViewId) -> Vec<VisibleLine> {
        let state = self.state.lock();
        let Some(view) = state.view(view) else {
            return Vec::new();
        };
        let total = view.lines.len();
        let range = view.viewport.clone().unwrap_or(0..total);
        let start = range.start.min(total);
        let end = range.end.min(total);
        (start..end)
            .map(|number| VisibleLine {
                number,
                text: view.lines[number].clone(),
            })
            .collect()
    }

    fn selection(&self, view: ViewId) -> Option<Selection> {
        self.state.lock().view(view).map(|view| view.selection)
    }

    fn set_selection(&self, view: ViewId, selection: Selection) {
        if let Some(view) = self.state.lock().view_mut(view) {
            view.selection = selection;
        }
    }

    fn focus_view(&self, view: ViewId) {
        let mut state = self.state.lock();
        let Some(index) = state.view(view).map(|view| view.group) else {
            return;
        };
        if let Some(GroupKind::Comparison {
            modified,
            modified_active,
            ..
        }) = state.groups.get_mut(index).map(|group| &mut group.kind)
        {
            *modified_active = *modified == view;
        }
        state.activate_group(index);
    }

    fn view_column(&self, view: ViewId) -> Option<u32> {
        self.state.lock().view(view).and_then(|view| view.column)
    }

    fn document(&self, view: ViewId) -> Option<DocumentId> {
        self.state
            .lock()
            .view(view)
            .map(|view| view.document.clone())
    }
}

impl OverlayHost for MemoryHost {
    fn create_overlay(&self, view: ViewId, range: TextRange, label: &str) -> OverlayHandle {
        let mut state = self.state.lock();
        state.next_overlay += 1;
        let handle = state.next_overlay;
        state.overlays.insert(
            handle,
            RenderedOverlay {
                view,
                range,
                label: label.to_string(),
            },
        );
        OverlayHandle(handle)
    }

    fn dispose_overlay(&self, handle: OverlayHandle) {
        self.state.lock().overlays.remove(&handle.0);
    }
}

#[async_trait]
impl Workbench for MemoryHost {
    fn view_groups(&self) -> Vec<ViewGroup> {
        let state = self.state.lock();
        state
            .groups
            .iter()
            .map(|group| {
                let document_of = |id: ViewId| {
                    state
                        .view(id)
                        .map(|view| view.document.clone())
                        .unwrap_or_else(|| DocumentId::new(""))
                };
                let active_tab = match &group.kind {
                    GroupKind::Single { view } => TabKind::Normal {
                        document: document_of(*view),
                    },
                    GroupKind::Comparison {
                        original, modified, ..
                    } => TabKind::Comparison {
                        original: document_of(*original),
                        modified: document_of(*modified),
                    },
                };
                ViewGroup {
                    id: group.id,
                    active_tab,
                }
            })
            .collect()
    }

    fn active_group(&self) -> Option<GroupId> {
        let state = self.state.lock();
        state
            .active_group
            .and_then(|index| state.groups.get(index))
            .map(|group| group.id)
    }

    fn active_document(&self) -> Option<DocumentId> {
        let state = self.state.lock();
        state
            .active_view
            .and_then(|id| state.view(id))
            .map(|view| view.document.clone())
    }

    async fn cycle_group(&self) {
        {
            let mut state = self.state.lock();
            state.group_cycles += 1;
            if !state.groups_pinned && !state.groups.is_empty() {
                let next = state
                    .active_group
                    .map_or(0, |index| (index + 1) % state.groups.len());
                state.activate_group(next);
            }
        }
        tokio::task::yield_now().await;
    }

    async fn switch_side(&self) {
        {
            let mut state = self.state.lock();
            state.side_switches += 1;
            let target = state.active_group.filter(|_| !state.sides_pinned);
            if let Some(index) = target {
                if let Some(GroupKind::Comparison {
                    modified_active, ..
                }) = state.groups.get_mut(index).map(|group| &mut group.kind)
                {
                    *modified_active = !*modified_active;
                }
                state.activate_group(index);
            }
        }
        tokio::task::yield_now().await;
    }
}

use crate::candidate::Candidate;
use crate::host::EditorHost;
use crate::host::Selection;
use crate::host::ViewId;
use crate::index::MatchIndex;
use crate::label::Label;
use crate::options::SearchOptions;
use crate::query::Query;

/// Caret or selection of the focused view, captured when filtering starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveSelection {
    pub view: ViewId,
    pub selection: Selection,
}

impl ActiveSelection {
    pub fn from_host<H>(host: &H) -> Option<Self>
    where
        H: EditorHost + ?Sized,
    {
        let view = host.active_view()?;
        let selection = host.selection(view)?;
        Some(Self { view, selection })
    }
}

/// Narrows indexed candidates by label prefix and search direction.
#[derive(Debug, Clone, Copy)]
pub struct MatchFilter {
    options: SearchOptions,
}

impl MatchFilter {
    pub fn new(options: SearchOptions) -> Self {
        Self { options }
    }

    /// `discriminator` must already be lowercase; labels always are.
    pub fn relevant(
        &self,
        discriminator: &str,
        candidate: &Candidate,
        active: Option<&ActiveSelection>,
    ) -> bool {
        let label = candidate.label.as_ref().map_or("", Label::as_str);
        if !label.starts_with(discriminator) {
            return false;
        }

        // Direction only constrains the focused view.
        let Some(active) = active.filter(|active| active.view == candidate.key.view) else {
            return true;
        };
        let start = candidate.key.start();
        if !self.options.backward && start < active.selection.start {
            return false;
        }
        if !self.options.forward && start >= active.selection.end {
            return false;
        }
        true
    }

    /// Indexed candidates that survive `query`, in discovery order.
    pub fn matches(
        &self,
        index: &MatchIndex,
        query: &Query,
        active: Option<&ActiveSelection>,
    ) -> Vec<Candidate> {
        let discriminator = query.discriminator().to_lowercase();
        index
            .candidates()
            .filter(|candidate| self.relevant(&discriminator, candidate, active))
            .collect()
    }
}

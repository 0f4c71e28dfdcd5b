use crate::candidate::Candidate;
use crate::candidate::CandidateKey;
use crate::host::EditorHost;
use crate::host::OverlayHandle;
use crate::host::OverlayHost;
use crate::label::LABEL_SPACE;
use crate::label::Label;
use crate::label::LabelAllocator;
use crate::scanner::CorpusScanner;
use std::collections::HashMap;
use tracing::debug;
use tracing::warn;

/// Labels for one generation of candidates plus the overlays drawn for them.
///
/// Every key in `overlays` is also a key in `labels`. The index does not know
/// which anchor it was built for; the session decides when to invalidate it.
#[derive(Debug, Default)]
pub struct MatchIndex {
    order: Vec<CandidateKey>,
    labels: HashMap<CandidateKey, Label>,
    overlays: HashMap<CandidateKey, OverlayHandle>,
    built: bool,
}

impl MatchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_built(&self) -> bool {
        self.built
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Scans once per generation; later calls are no-ops until [`invalidate`].
    ///
    /// [`invalidate`]: MatchIndex::invalidate
    pub fn ensure_built<H>(&mut self, host: &H, scanner: &CorpusScanner, anchor: &str)
    where
        H: EditorHost + ?Sized,
    {
        if self.built {
            return;
        }
        for key in scanner.scan(host, anchor) {
            self.insert(key);
        }
        self.built = true;
        if self.labels.len() > LABEL_SPACE {
            warn!(
                candidates = self.labels.len(),
                capacity = LABEL_SPACE,
                "label space exhausted; labels repeat"
            );
        }
        debug!(anchor, candidates = self.order.len(), "built match index");
    }

    fn insert(&mut self, key: CandidateKey) {
        if self.labels.contains_key(&key) {
            return;
        }
        let label = LabelAllocator::label(self.labels.len());
        self.labels.insert(key, label);
        self.order.push(key);
    }

    /// Label for `key`, cut to `prefix_len` characters when given.
    pub fn lookup_label(&self, key: &CandidateKey, prefix_len: Option<usize>) -> Option<&str> {
        let label = self.labels.get(key)?;
        Some(match prefix_len {
            Some(len) => label.prefix(len),
            None => label.as_str(),
        })
    }

    /// Candidates in discovery order.
    pub fn candidates(&self) -> impl Iterator<Item = Candidate> + '_ {
        self.order.iter().map(|key| Candidate {
            key: *key,
            label: self.labels.get(key).cloned(),
            visible: self.overlays.contains_key(key),
        })
    }

    pub fn visible_keys(&self) -> Vec<CandidateKey> {
        self.overlays.keys().copied().collect()
    }

    pub fn is_visible(&self, key: &CandidateKey) -> bool {
        self.overlays.contains_key(key)
    }

    /// Draws the overlay for `key` truncated to `label_len`. Unknown keys and
    /// keys that already have an overlay are left alone.
    pub fn show<H>(&mut self, host: &H, key: CandidateKey, label_len: usize)
    where
        H: OverlayHost + ?Sized,
    {
        if self.overlays.contains_key(&key) {
            return;
        }
        let Some(label) = self.lookup_label(&key, Some(label_len)) else {
            return;
        };
        let handle = host.create_overlay(key.view, key.range(), label);
        self.overlays.insert(key, handle);
    }

    pub fn hide<H>(&mut self, host: &H, key: &CandidateKey)
    where
        H: OverlayHost + ?Sized,
    {
        if let Some(handle) = self.overlays.remove(key) {
            host.dispose_overlay(handle);
        }
    }

    pub fn hide_all<H>(&mut self, host: &H)
    where
        H: OverlayHost + ?Sized,
    {
        for (_, handle) in self.overlays.drain() {
            host.dispose_overlay(handle);
        }
    }

    /// Releases every overlay and forgets the generation.
    pub fn invalidate<H>(&mut self, host: &H)
    where
        H: OverlayHost + ?Sized,
    {
        self.hide_all(host);
        self.labels.clear();
        self.order.clear();
        self.built = false;
    }
}

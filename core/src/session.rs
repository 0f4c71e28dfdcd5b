//! One interactive search, from the first keystroke to the jump.

use crate::candidate::Candidate;
use crate::candidate::CandidateKey;
use crate::filter::ActiveSelection;
use crate::filter::MatchFilter;
use crate::host::Host;
use crate::index::MatchIndex;
use crate::navigator::JumpRequest;
use crate::options::SearchOptions;
use crate::query::Query;
use crate::scanner::CorpusScanner;
use std::collections::HashSet;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Scanning,
    Narrowing,
    Jumped,
    Cancelled,
}

impl SessionState {
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionState::Jumped | SessionState::Cancelled)
    }
}

/// Notifications from the host's query input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    QueryChanged(String),
    Accept,
    Cancel,
    /// The input went away without an explicit accept or cancel.
    Hidden,
}

/// What the caller has to do after feeding the session an event.
#[derive(Debug)]
pub enum Transition {
    Idle,
    Narrowing { matches: usize },
    /// The session ended and wants the caret moved. Overlays are already gone.
    Jump(JumpRequest),
    /// The session ended without navigation.
    Closed,
    /// The session had already ended.
    Ignored,
}

pub struct SearchSession<H: ?Sized> {
    host: Arc<H>,
    scanner: CorpusScanner,
    filter: MatchFilter,
    index: MatchIndex,
    /// Anchor the current index generation was built for.
    anchor: Option<String>,
    query: Query,
    label_len: usize,
    state: SessionState,
    cancel: CancellationToken,
}

impl<H> SearchSession<H>
where
    H: Host + ?Sized,
{
    pub fn new(host: Arc<H>, options: SearchOptions) -> Self {
        Self {
            host,
            scanner: CorpusScanner::new(options),
            filter: MatchFilter::new(options),
            index: MatchIndex::new(),
            anchor: None,
            query: Query::default(),
            label_len: 0,
            state: SessionState::Idle,
            cancel: CancellationToken::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn index(&self) -> &MatchIndex {
        &self.index
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn handle(&mut self, event: SessionEvent) -> Transition {
        match event {
            SessionEvent::QueryChanged(text) => self.query_changed(&text),
            SessionEvent::Accept => self.accept(),
            SessionEvent::Cancel | SessionEvent::Hidden => self.cancel(),
        }
    }

    pub fn query_changed(&mut self, text: &str) -> Transition {
        if self.state.is_terminal() {
            return Transition::Ignored;
        }
        let query = Query::parse(text);
        if !query.is_searchable() {
            self.reset();
            self.query = query;
            self.state = SessionState::Idle;
            return Transition::Idle;
        }

        if self.anchor.as_deref() != Some(query.anchor()) {
            if let Some(previous) = &self.anchor {
                debug!(previous = %previous, anchor = query.anchor(), "anchor changed");
            }
            self.reset();
            self.anchor = Some(query.anchor().to_string());
        }
        if !self.index.is_built() {
            self.state = SessionState::Scanning;
            self.index.ensure_built(&*self.host, &self.scanner, query.anchor());
        }

        let label_len = query.label_len();
        self.query = query;
        let matches = self.current_matches();
        if let [only] = matches.as_slice() {
            return self.commit(only.key);
        }

        if label_len != self.label_len {
            self.index.hide_all(&*self.host);
            self.label_len = label_len;
        }
        let keep: HashSet<CandidateKey> = matches.iter().map(|candidate| candidate.key).collect();
        for key in self.index.visible_keys() {
            if !keep.contains(&key) {
                self.index.hide(&*self.host, &key);
            }
        }
        for candidate in &matches {
            self.index.show(&*self.host, candidate.key, label_len);
        }

        self.state = SessionState::Narrowing;
        debug!(
            query = self.query.len(),
            matches = matches.len(),
            "narrowed candidates"
        );
        Transition::Narrowing {
            matches: matches.len(),
        }
    }

    /// Jumps to the first remaining candidate, if any, and ends the session.
    pub fn accept(&mut self) -> Transition {
        if self.state.is_terminal() {
            return Transition::Ignored;
        }
        let first = if self.index.is_built() {
            self.current_matches().first().map(|candidate| candidate.key)
        } else {
            None
        };
        if let Some(target) = first {
            return self.commit(target);
        }
        self.end();
        self.state = SessionState::Cancelled;
        Transition::Closed
    }

    pub fn cancel(&mut self) -> Transition {
        if self.state.is_terminal() {
            return Transition::Ignored;
        }
        self.abort();
        Transition::Closed
    }

    /// Ends the session and cancels any jump it already handed out.
    pub fn abort(&mut self) {
        self.cancel.cancel();
        self.end();
        if !self.state.is_terminal() {
            self.state = SessionState::Cancelled;
        }
    }

    /// Releases every overlay and clears the index. Safe to call repeatedly.
    pub fn end(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.index.invalidate(&*self.host);
        self.anchor = None;
        self.label_len = 0;
    }

    fn current_matches(&self) -> Vec<Candidate> {
        let active = ActiveSelection::from_host(&*self.host);
        self.filter.matches(&self.index, &self.query, active.as_ref())
    }

    fn commit(&mut self, target: CandidateKey) -> Transition {
        self.end();
        self.state = SessionState::Jumped;
        debug!(
            view = target.view.0,
            line = target.line,
            column = target.start,
            "committed jump"
        );
        Transition::Jump(JumpRequest {
            target,
            cancel: self.cancel.clone(),
        })
    }
}

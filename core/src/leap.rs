use crate::candidate::CandidateKey;
use crate::config::LeapCommand;
use crate::config::LeapConfig;
use crate::error::NavigationError;
use crate::error::Result;
use crate::host::Host;
use crate::navigator::ViewNavigator;
use crate::options::SearchOptions;
use crate::session::SearchSession;
use crate::session::SessionEvent;
use crate::session::SessionState;
use crate::session::Transition;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing::warn;

/// A committed jump still running on the runtime.
struct PendingJump {
    target: CandidateKey,
    cancel: CancellationToken,
    task: JoinHandle<std::result::Result<(), NavigationError>>,
}

/// Owns the single live search and runs the jumps it commits to.
pub struct Leap<H: ?Sized> {
    host: Arc<H>,
    config: LeapConfig,
    navigator: ViewNavigator<H>,
    session: Option<SearchSession<H>>,
    pending: Option<PendingJump>,
    last_jump: Option<CandidateKey>,
}

impl<H> Leap<H>
where
    H: Host + ?Sized + 'static,
{
    pub fn new(host: Arc<H>, config: LeapConfig) -> Self {
        Self {
            navigator: ViewNavigator::new(Arc::clone(&host)),
            host,
            config,
            session: None,
            pending: None,
            last_jump: None,
        }
    }

    pub fn start(&mut self, command: LeapCommand) -> Result<()> {
        let options = self.config.options_for(command);
        debug!(%command, "starting search");
        self.start_with(options)
    }

    /// Opens a new session, aborting the one that was live along with any
    /// jump it left in flight.
    pub fn start_with(&mut self, options: SearchOptions) -> Result<()> {
        options.validate()?;
        self.close();
        self.session = Some(SearchSession::new(Arc::clone(&self.host), options));
        self.last_jump = None;
        Ok(())
    }

    pub fn session(&self) -> Option<&SearchSession<H>> {
        self.session.as_ref()
    }

    /// Where the caret was last moved to, cleared whenever a search starts.
    /// Only known once the jump has been [`settle`](Leap::settle)d.
    pub fn last_jump(&self) -> Option<CandidateKey> {
        self.last_jump
    }

    /// Whether a committed jump is still being resolved.
    pub fn is_jumping(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|pending| !pending.task.is_finished())
    }

    /// Feeds `event` to the live session. A committed jump is spawned onto
    /// the Tokio runtime, so this must run inside one; `start`, `start_with`
    /// and `close` cancel it until it has moved the caret.
    /// Returns `None` when no session is live.
    pub fn handle(&mut self, event: SessionEvent) -> Option<SessionState> {
        let session = self.session.as_mut()?;
        if let Transition::Jump(request) = session.handle(event) {
            let navigator = self.navigator.clone();
            let target = request.target;
            let cancel = request.cancel.clone();
            let task = tokio::spawn(async move { navigator.jump_to(&request).await });
            self.pending = Some(PendingJump {
                target,
                cancel,
                task,
            });
        }
        let state = session.state();
        if state.is_terminal() {
            self.session = None;
        }
        Some(state)
    }

    /// Waits for the jump in flight, if any. A jump that could not complete
    /// is logged and otherwise ignored. Returns [`last_jump`](Leap::last_jump).
    pub async fn settle(&mut self) -> Option<CandidateKey> {
        if let Some(pending) = self.pending.take() {
            match pending.task.await {
                Ok(Ok(())) => self.last_jump = Some(pending.target),
                Ok(Err(err)) => warn!(%err, "jump abandoned"),
                Err(err) => warn!(%err, "jump task failed"),
            }
        }
        self.last_jump
    }

    /// Aborts the live session and any jump still in flight.
    pub fn close(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.abort();
            debug!("aborted live search");
        }
        if let Some(pending) = self.pending.take() {
            pending.cancel.cancel();
            debug!(view = pending.target.view.0, "cancelled jump in flight");
        }
    }
}

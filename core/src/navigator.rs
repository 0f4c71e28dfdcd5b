use crate::candidate::CandidateKey;
use crate::error::NavigationError;
use crate::host::DocumentId;
use crate::host::GroupId;
use crate::host::Host;
use crate::host::Selection;
use crate::host::TabKind;
use leap_async_utils::OrCancelExt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing::info;

/// Attempts at flipping a comparison view (left, right, unified).
pub const MAX_SIDE_SWITCHES: usize = 3;

/// A jump the session committed to. The token is cancelled when the session
/// that issued it is aborted or superseded.
#[derive(Debug, Clone)]
pub struct JumpRequest {
    pub target: CandidateKey,
    pub cancel: CancellationToken,
}

/// Moves the caret to a candidate, resolving which view actually owns it.
pub struct ViewNavigator<H: ?Sized> {
    host: Arc<H>,
}

impl<H: ?Sized> Clone for ViewNavigator<H> {
    fn clone(&self) -> Self {
        Self {
            host: Arc::clone(&self.host),
        }
    }
}

impl<H> ViewNavigator<H>
where
    H: Host + ?Sized,
{
    pub fn new(host: Arc<H>) -> Self {
        Self { host }
    }

    pub async fn jump_to(&self, request: &JumpRequest) -> Result<(), NavigationError> {
        let target = request.target;
        if request.cancel.is_cancelled() {
            return Err(NavigationError::Cancelled);
        }

        if self.host.view_column(target.view).is_some() {
            self.host.focus_view(target.view);
            self.host
                .set_selection(target.view, Selection::caret(target.start()));
            info!(view = target.view.0, line = target.line, column = target.start, "jumped");
            return Ok(());
        }

        let document = self
            .host
            .document(target.view)
            .ok_or(NavigationError::TargetNotFound)?;
        let group = self
            .comparison_group(&document)
            .ok_or(NavigationError::TargetNotFound)?;
        self.activate_group(group, &request.cancel).await?;
        self.activate_side(&document, &request.cancel).await?;

        // The session may have gone away while we were waiting on the host.
        if request.cancel.is_cancelled() {
            return Err(NavigationError::Cancelled);
        }
        self.host
            .set_selection(target.view, Selection::caret(target.start()));
        info!(
            view = target.view.0,
            line = target.line,
            column = target.start,
            document = %document,
            "jumped into comparison view"
        );
        Ok(())
    }

    fn comparison_group(&self, document: &DocumentId) -> Option<GroupId> {
        self.host
            .view_groups()
            .into_iter()
            .find(|group| {
                matches!(group.active_tab, TabKind::Comparison { .. })
                    && group.active_tab.shows(document)
            })
            .map(|group| group.id)
    }

    async fn activate_group(
        &self,
        group: GroupId,
        cancel: &CancellationToken,
    ) -> Result<(), NavigationError> {
        let limit = self.host.view_groups().len();
        let mut attempts = 0;
        while self.host.active_group() != Some(group) {
            if attempts >= limit {
                return Err(NavigationError::GroupResolutionTimeout { attempts });
            }
            self.host
                .cycle_group()
                .or_cancel(cancel)
                .await
                .map_err(|_| NavigationError::Cancelled)?;
            attempts += 1;
            debug!(attempts, group = group.0, "cycled view group");
        }
        Ok(())
    }

    async fn activate_side(
        &self,
        document: &DocumentId,
        cancel: &CancellationToken,
    ) -> Result<(), NavigationError> {
        let mut attempts = 0;
        while self.host.active_document().as_ref() != Some(document) {
            if attempts >= MAX_SIDE_SWITCHES {
                return Err(NavigationError::SideResolutionTimeout { attempts });
            }
            self.host
                .switch_side()
                .or_cancel(cancel)
                .await
                .map_err(|_| NavigationError::Cancelled)?;
            attempts += 1;
            debug!(attempts, %document, "switched comparison side");
        }
        Ok(())
    }
}

use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::backend::scope::guarded;
use crate::backend::traits::PortfolioBackend;
use crate::errors::CoreError;
use crate::models::analysis::{AnalysisRequest, AnalysisResult, AnalysisState};
use crate::models::goal::GoalList;
use crate::models::portfolio::AssetList;

/// A submitted analysis: the frozen request plus the id that must match
/// when its outcome is reported back.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisTicket {
    id: Uuid,
    request: AnalysisRequest,
}

impl AnalysisTicket {
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn request(&self) -> &AnalysisRequest {
        &self.request
    }
}

/// Idle → Pending → Success | Failed, and back to Pending on resubmission.
///
/// At most one request is pending. `begin` refuses while one is, and
/// `complete` ignores outcomes whose ticket is no longer current.
#[derive(Debug)]
pub struct AnalysisOrchestrator {
    state: AnalysisState,
}

impl AnalysisOrchestrator {
    pub fn new() -> Self {
        Self {
            state: AnalysisState::Idle,
        }
    }

    #[must_use]
    pub fn state(&self) -> &AnalysisState {
        &self.state
    }

    /// Whether the trigger is enabled.
    #[must_use]
    pub fn can_submit(&self, assets: &AssetList) -> bool {
        !self.state.is_pending() && !assets.is_empty()
    }

    /// Snapshot assets and goals into a request and move to Pending.
    /// Any previous result is dropped.
    pub fn begin(&mut self, assets: &AssetList, goals: &GoalList) -> Result<AnalysisTicket, CoreError> {
        if self.state.is_pending() {
            debug!("analysis already pending, submission ignored");
            return Err(CoreError::RequestPending);
        }
        if assets.is_empty() {
            return Err(CoreError::EmptyPortfolio);
        }

        let ticket = AnalysisTicket {
            id: Uuid::new_v4(),
            request: AnalysisRequest {
                portfolio: assets.to_portfolio(),
                goals: goals.to_request_goals(),
            },
        };
        self.state = AnalysisState::Pending {
            ticket: ticket.id,
            started_at: Utc::now(),
        };
        info!(
            ticket = %ticket.id,
            assets = ticket.request.portfolio.assets.len(),
            custom_goals = ticket.request.goals.is_some(),
            "analysis submitted"
        );
        Ok(ticket)
    }

    /// Record the outcome of `ticket`. Returns `false` when the outcome was
    /// discarded (stale ticket, or the request was cancelled).
    pub fn complete(
        &mut self,
        ticket: &AnalysisTicket,
        outcome: Result<AnalysisResult, CoreError>,
    ) -> bool {
        match &self.state {
            AnalysisState::Pending { ticket: current, .. } if *current == ticket.id => {}
            _ => {
                debug!(ticket = %ticket.id, "stale analysis outcome discarded");
                return false;
            }
        }

        match outcome {
            Ok(result) => {
                info!(ticket = %ticket.id, backend_error = result.is_failure(), "analysis completed");
                self.state = AnalysisState::Success(result);
                true
            }
            Err(CoreError::Cancelled) => {
                debug!(ticket = %ticket.id, "analysis cancelled");
                self.state = AnalysisState::Idle;
                false
            }
            Err(e) => {
                error!("Analysis error: {}", e);
                self.state = AnalysisState::Failed(AnalysisResult::failed(failure_message(&e)));
                true
            }
        }
    }
}

impl Default for AnalysisOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

/// "Analysis failed: <reason>" for a failed request.
#[must_use]
pub fn failure_message(err: &CoreError) -> String {
    format!("Analysis failed: {}", err.user_message())
}

/// Send the ticket's request, unless `token` is cancelled first.
pub async fn run_analysis(
    backend: &dyn PortfolioBackend,
    token: &CancellationToken,
    ticket: &AnalysisTicket,
) -> Result<AnalysisResult, CoreError> {
    guarded(token, backend.analyze_portfolio(ticket.request())).await
}

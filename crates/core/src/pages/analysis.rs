use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::backend::scope::ViewScope;
use crate::backend::traits::PortfolioBackend;
use crate::errors::CoreError;
use crate::models::analysis::{AnalysisResult, AnalysisState};
use crate::models::asset::Asset;
use crate::models::goal::{GoalList, DEFAULT_GOALS_LABEL};
use crate::models::portfolio::{AssetList, PortfolioSource};
use crate::models::view::AnalysisView;
use crate::services::analysis_service::{run_analysis, AnalysisOrchestrator, AnalysisTicket};
use crate::services::asset_editor::AssetEditor;
use crate::services::render_service::RenderService;
use crate::services::resolver_service::PortfolioResolver;
use crate::services::store::PortfolioStore;

/// `/analysis`: editable assets, goals, and the AI analysis trigger.
pub struct AnalysisPage {
    scope: ViewScope,
    backend: Arc<dyn PortfolioBackend>,
    assets: AssetList,
    goals: GoalList,
    source: PortfolioSource,
    editor: AssetEditor,
    orchestrator: AnalysisOrchestrator,
    render: RenderService,
}

impl AnalysisPage {
    pub async fn mount(
        backend: Arc<dyn PortfolioBackend>,
        store: PortfolioStore,
    ) -> Result<Self, CoreError> {
        let scope = ViewScope::new();
        let resolved = PortfolioResolver::new()
            .resolve(backend.as_ref(), &store, &scope)
            .await?;
        Ok(Self {
            scope,
            backend,
            assets: resolved.assets,
            goals: GoalList::new(),
            source: resolved.source,
            editor: AssetEditor::new(),
            orchestrator: AnalysisOrchestrator::new(),
            render: RenderService::new(),
        })
    }

    #[must_use]
    pub fn assets(&self) -> &AssetList {
        &self.assets
    }

    #[must_use]
    pub fn goals(&self) -> &GoalList {
        &self.goals
    }

    #[must_use]
    pub fn source(&self) -> PortfolioSource {
        self.source
    }

    /// Subtitle under the page heading.
    #[must_use]
    pub fn source_hint(&self) -> &'static str {
        if self.source.is_user_data() {
            "Analyze your uploaded portfolio using our advanced AI system"
        } else {
            "You're using sample data. Upload your own portfolio for personalized analysis."
        }
    }

    /// Goal chips, or the default-goals label when none are set.
    #[must_use]
    pub fn goal_labels(&self) -> Vec<String> {
        if self.goals.is_empty() {
            vec![DEFAULT_GOALS_LABEL.to_string()]
        } else {
            self.goals.iter().cloned().collect()
        }
    }

    // ── Editing ─────────────────────────────────────────────────────

    pub fn add_asset(&mut self, ticker: &str, quantity: f64) -> bool {
        self.editor.add_asset(&mut self.assets, ticker, quantity)
    }

    pub fn add_asset_input(&mut self, ticker: &str, quantity: &str) -> bool {
        self.editor.add_asset_input(&mut self.assets, ticker, quantity)
    }

    pub fn remove_asset(&mut self, index: usize) -> Option<Asset> {
        self.editor.remove_asset(&mut self.assets, index)
    }

    pub fn add_goal(&mut self, text: &str) -> bool {
        self.goals.add_goal(text)
    }

    pub fn remove_goal(&mut self, text: &str) -> bool {
        self.goals.remove_goal(text)
    }

    // ── Analysis ────────────────────────────────────────────────────

    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.orchestrator.can_submit(&self.assets)
    }

    #[must_use]
    pub fn state(&self) -> &AnalysisState {
        self.orchestrator.state()
    }

    /// Freeze the current assets and goals into a request and go Pending.
    /// Fails with `RequestPending` or `EmptyPortfolio` without sending anything.
    pub fn begin_analysis(&mut self) -> Result<AnalysisTicket, CoreError> {
        self.orchestrator.begin(&self.assets, &self.goals)
    }

    pub fn finish_analysis(
        &mut self,
        ticket: &AnalysisTicket,
        outcome: Result<AnalysisResult, CoreError>,
    ) -> bool {
        self.orchestrator.complete(ticket, outcome)
    }

    /// Backend handle and scope token, for sending a ticket from a spawned task.
    #[must_use]
    pub fn dispatcher(&self) -> (Arc<dyn PortfolioBackend>, CancellationToken) {
        (Arc::clone(&self.backend), self.scope.token())
    }

    /// Begin, send, and record the outcome in one go.
    pub async fn submit(&mut self) -> Result<&AnalysisState, CoreError> {
        let ticket = self.begin_analysis()?;
        let outcome = run_analysis(self.backend.as_ref(), &self.scope.token(), &ticket).await;
        self.finish_analysis(&ticket, outcome);
        Ok(self.orchestrator.state())
    }

    /// What to show under the trigger, once a result exists.
    #[must_use]
    pub fn view(&self) -> Option<AnalysisView> {
        self.orchestrator
            .state()
            .result()
            .map(|result| self.render.analysis_view(result))
    }

    pub fn unmount(&self) {
        self.scope.cancel();
    }
}

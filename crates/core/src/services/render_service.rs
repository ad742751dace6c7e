use crate::models::analysis::{AnalysisDetails, AnalysisResult};
use crate::models::portfolio::{AssetList, PortfolioSource};
use crate::models::upload::UploadStatus;
use crate::models::view::{AnalysisView, DashboardView, DetailsView, RiskGauge, SectorBar, UploadSummary};

const SAMPLE_HINT: &str =
    "You're currently viewing a sample portfolio. Upload your own portfolio for personalized analysis.";

/// Turns workflow state into view models.
///
/// Decides which sections exist; the front end only draws them.
pub struct RenderService;

impl RenderService {
    pub fn new() -> Self {
        Self
    }

    /// Apply the display rules to an analysis result:
    /// - error banner iff `error` is non-empty, and then nothing else
    /// - report iff non-empty, split into paragraphs on newlines
    /// - details block iff it has any key; risk, sectors and
    ///   recommendations each shown iff present
    pub fn analysis_view(&self, result: &AnalysisResult) -> AnalysisView {
        if result.is_failure() {
            return AnalysisView {
                error_banner: Some(result.error.clone()),
                report: None,
                details: None,
            };
        }

        let report = if result.report.is_empty() {
            None
        } else {
            Some(result.report.split('\n').map(str::to_string).collect())
        };

        let details = if result.details.is_empty() {
            None
        } else {
            Some(self.details_view(&result.details))
        };

        AnalysisView {
            error_banner: None,
            report,
            details,
        }
    }

    fn details_view(&self, details: &AnalysisDetails) -> DetailsView {
        DetailsView {
            risk: details.risk_score.map(|score| RiskGauge {
                score,
                fill_pct: score.clamp(0.0, 100.0),
            }),
            sectors: details.categories.as_ref().map(|cats| {
                cats.iter()
                    .map(|(sector, pct)| SectorBar {
                        sector: sector.clone(),
                        percentage: *pct,
                    })
                    .collect()
            }),
            recommendations: details.recommendations.clone(),
        }
    }

    /// Upload banner: message, then on success "Found N assets...", the
    /// first `limit` assets and a "...and K more" line for the rest.
    pub fn upload_summary(&self, status: &UploadStatus, limit: usize) -> UploadSummary {
        if !status.success {
            return UploadSummary {
                success: false,
                message: status.message.clone(),
                found_line: None,
                listed: Vec::new(),
                more_line: None,
            };
        }

        let assets = status.assets();
        let listed = assets.iter().take(limit).map(|a| a.to_string()).collect();
        let more_line = (assets.len() > limit).then(|| format!("...and {} more", assets.len() - limit));

        UploadSummary {
            success: true,
            message: status.message.clone(),
            found_line: status
                .data
                .as_ref()
                .map(|_| format!("Found {} assets in your portfolio.", assets.len())),
            listed,
            more_line,
        }
    }

    pub fn dashboard_view(&self, assets: &AssetList, source: PortfolioSource) -> DashboardView {
        let status_label = if source.is_user_data() {
            "Portfolio Uploaded"
        } else {
            "Using Sample Portfolio"
        };
        DashboardView {
            source,
            status_label,
            total_assets: assets.len(),
            assets: assets.as_slice().to_vec(),
            hint: (!source.is_user_data()).then_some(SAMPLE_HINT),
            can_clear: source.is_user_data(),
        }
    }
}

impl Default for RenderService {
    fn default() -> Self {
        Self::new()
    }
}

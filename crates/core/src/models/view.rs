use serde::Serialize;
use std::fmt;

use super::asset::Asset;
use super::portfolio::PortfolioSource;

/// Render-ready analysis output.
///
/// The core decides which sections exist; the front end only draws them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalysisView {
    /// Shown iff the result carries an error
    pub error_banner: Option<String>,

    /// Report paragraphs, shown iff the report is non-empty
    pub report: Option<Vec<String>>,

    /// "Detailed Insights", shown iff the details map has any key
    pub details: Option<DetailsView>,
}

/// Each part is independent of the others.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DetailsView {
    pub risk: Option<RiskGauge>,
    pub sectors: Option<Vec<SectorBar>>,
    pub recommendations: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskGauge {
    /// Score as reported by the backend
    pub score: f64,
    /// Gauge fill, clamped to 0-100
    pub fill_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorBar {
    pub sector: String,
    pub percentage: f64,
}

/// Banner shown under the upload form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadSummary {
    pub success: bool,
    pub message: String,
    /// "Found N assets in your portfolio." (success only)
    pub found_line: Option<String>,
    /// First few extracted assets, "TICKER: quantity"
    pub listed: Vec<String>,
    /// "...and K more" when the list was truncated
    pub more_line: Option<String>,
}

/// Dashboard page content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub source: PortfolioSource,
    pub status_label: &'static str,
    pub total_assets: usize,
    pub assets: Vec<Asset>,
    /// Nudge towards uploading, shown when not on user data
    pub hint: Option<&'static str>,
    /// Whether the "Clear Portfolio" action is offered
    pub can_clear: bool,
}

impl fmt::Display for AnalysisView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(err) = &self.error_banner {
            writeln!(f, "Error")?;
            writeln!(f, "{err}")?;
        }
        if let Some(paragraphs) = &self.report {
            writeln!(f, "== Analysis Report ==")?;
            for p in paragraphs {
                writeln!(f, "{p}")?;
            }
        }
        if let Some(details) = &self.details {
            writeln!(f, "== Detailed Insights ==")?;
            write!(f, "{details}")?;
        }
        Ok(())
    }
}

impl fmt::Display for DetailsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const BAR_WIDTH: f64 = 20.0;

        if let Some(risk) = &self.risk {
            writeln!(f, "Risk Assessment")?;
            let filled = ((risk.fill_pct / 100.0) * BAR_WIDTH).round() as usize;
            writeln!(
                f,
                "  Low Risk [{}{}] High Risk  ({})",
                "#".repeat(filled),
                "-".repeat(BAR_WIDTH as usize - filled),
                risk.score
            )?;
        }
        if let Some(sectors) = &self.sectors {
            writeln!(f, "Sector Allocation")?;
            for bar in sectors {
                writeln!(f, "  {:<16} {}%", bar.sector, bar.percentage)?;
            }
        }
        if let Some(recs) = &self.recommendations {
            writeln!(f, "Recommendations")?;
            for rec in recs {
                writeln!(f, "  - {rec}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for UploadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.message)?;
        if let Some(found) = &self.found_line {
            writeln!(f, "{found}")?;
        }
        if !self.listed.is_empty() {
            writeln!(f, "Extracted Assets:")?;
            for line in &self.listed {
                writeln!(f, "  - {line}")?;
            }
        }
        if let Some(more) = &self.more_line {
            writeln!(f, "  - {more}")?;
        }
        Ok(())
    }
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Status: {}", self.status_label)?;
        writeln!(f, "Total Assets: {}", self.total_assets)?;
        if let Some(hint) = self.hint {
            writeln!(f, "{hint}")?;
        }
        if self.assets.is_empty() {
            writeln!(f, "No assets found in the portfolio")?;
        } else {
            writeln!(f, "{:<10} {:>12}", "Symbol", "Quantity")?;
            for asset in &self.assets {
                writeln!(f, "{:<10} {:>12}", asset.ticker, asset.quantity)?;
            }
        }
        Ok(())
    }
}

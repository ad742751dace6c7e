use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::null_as_default;
use super::portfolio::Portfolio;

/// Body of `POST /portfolio/analyze`.
///
/// `goals` is skipped entirely when `None`; an empty list is never sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub portfolio: Portfolio,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals: Option<Vec<String>>,
}

/// Optional detail payload of an analysis. Each field renders on its own;
/// a partial payload is valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisDetails {
    /// Overall risk on a 0-100 scale
    #[serde(rename = "riskScore", default, skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<f64>,

    /// Sector name → allocation percentage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<BTreeMap<String, f64>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<String>>,

    /// Opaque to the client
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forecasts: Option<serde_json::Map<String, serde_json::Value>>,

    /// Any other keys the backend adds
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl AnalysisDetails {
    /// True when the backend sent no detail keys at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.risk_score.is_none()
            && self.categories.is_none()
            && self.recommendations.is_none()
            && self.forecasts.is_none()
            && self.extra.is_empty()
    }
}

/// Response of `POST /portfolio/analyze`, or a locally synthesized failure.
///
/// A non-empty `error` means failure; `report` and `details` are then
/// ignored even if present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub report: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub error: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub details: AnalysisDetails,
}

impl AnalysisResult {
    /// Failure result carrying only an error message.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            report: String::new(),
            error: error.into(),
            details: AnalysisDetails::default(),
        }
    }

    #[must_use]
    pub fn is_failure(&self) -> bool {
        !self.error.is_empty()
    }
}

/// Where the analysis workflow currently stands.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisState {
    Idle,
    Pending {
        ticket: uuid::Uuid,
        started_at: DateTime<Utc>,
    },
    Success(AnalysisResult),
    Failed(AnalysisResult),
}

impl AnalysisState {
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, AnalysisState::Pending { .. })
    }

    /// Last completed result, if any.
    #[must_use]
    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            AnalysisState::Success(r) | AnalysisState::Failed(r) => Some(r),
            _ => None,
        }
    }
}

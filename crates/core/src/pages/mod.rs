//! The three client pages. Each owns its state and a `ViewScope`; dropping
//! a page cancels whatever it still has in flight.

pub mod analysis;
pub mod dashboard;
pub mod upload;

use std::time::Duration;

pub use analysis::AnalysisPage;
pub use dashboard::DashboardPage;
pub use upload::UploadPage;

/// Client routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Dashboard,
    Upload,
    Analysis,
}

impl Route {
    #[must_use]
    pub fn path(&self) -> &'static str {
        match self {
            Route::Dashboard => "/",
            Route::Upload => "/upload",
            Route::Analysis => "/analysis",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "/" => Some(Route::Dashboard),
            "/upload" => Some(Route::Upload),
            "/analysis" => Some(Route::Analysis),
            _ => None,
        }
    }
}

/// Navigate to `to` once `after` has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect {
    pub to: Route,
    pub after: Duration,
}

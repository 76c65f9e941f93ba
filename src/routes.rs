//! Client-side routing table: URL path to view.

use std::fmt;

/// Views of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Leaderboard,
    Upload,
    ConfirmResult,
    BenchmarkDetail,
    EditRecord,
    OAuthCallback,
}

/// Path → view. `/parse-result` is the old name of `/upload` and stays for old links.
const ROUTES: [(&str, Route); 7] = [
    ("/", Route::Leaderboard),
    ("/upload", Route::Upload),
    ("/confirm", Route::ConfirmResult),
    ("/detail", Route::BenchmarkDetail),
    ("/edit", Route::EditRecord),
    ("/parse-result", Route::Upload),
    ("/oauth/callback", Route::OAuthCallback),
];

fn normalize(path: &str) -> &str {
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}

impl Route {
    /// Resolve a path (without query string). A trailing slash is ignored.
    pub fn from_path(path: &str) -> Option<Route> {
        let path = normalize(path);
        ROUTES
            .iter()
            .find(|(candidate, _)| *candidate == path)
            .map(|(_, route)| *route)
    }

    /// Canonical path of the view.
    pub fn path(self) -> &'static str {
        match self {
            Route::Leaderboard => "/",
            Route::Upload => "/upload",
            Route::ConfirmResult => "/confirm",
            Route::BenchmarkDetail => "/detail",
            Route::EditRecord => "/edit",
            Route::OAuthCallback => "/oauth/callback",
        }
    }

    /// Whether `path` is a deprecated alias rather than the canonical path.
    pub fn is_alias(path: &str) -> bool {
        Route::from_path(path).is_some_and(|route| route.path() != normalize(path))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

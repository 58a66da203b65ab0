//! Page catalogue: the fixed set of routable pages and URL resolution.
//!
//! Public pages: Disclaimer, Welcome, PrivacyPolicy, TermsOfService, Testimonials.
//! Every other page is protected and must pass the session gate.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CompanionError;

/// Every routable page in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PageId {
    Dashboard,
    Disclaimer,
    Companion,
    Checkin,
    Calendar,
    Exercises,
    Journal,
    Profile,
    Settings,
    PrivacyPolicy,
    TermsOfService,
    Admin,
    Welcome,
    Subscription,
    AdminLogin,
    Testimonials,
    DailySummary,
}

impl PageId {
    /// All 17 pages, in routing order. The first entry is the fallback page.
    pub const ALL: [PageId; 17] = [
        Self::Dashboard,
        Self::Disclaimer,
        Self::Companion,
        Self::Checkin,
        Self::Calendar,
        Self::Exercises,
        Self::Journal,
        Self::Profile,
        Self::Settings,
        Self::PrivacyPolicy,
        Self::TermsOfService,
        Self::Admin,
        Self::Welcome,
        Self::Subscription,
        Self::AdminLogin,
        Self::Testimonials,
        Self::DailySummary,
    ];

    /// Pages reachable without a session (5).
    pub const PUBLIC: [PageId; 5] = [
        Self::Disclaimer,
        Self::Welcome,
        Self::PrivacyPolicy,
        Self::TermsOfService,
        Self::Testimonials,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Disclaimer => "Disclaimer",
            Self::Companion => "Companion",
            Self::Checkin => "Checkin",
            Self::Calendar => "Calendar",
            Self::Exercises => "Exercises",
            Self::Journal => "Journal",
            Self::Profile => "Profile",
            Self::Settings => "Settings",
            Self::PrivacyPolicy => "PrivacyPolicy",
            Self::TermsOfService => "TermsOfService",
            Self::Admin => "Admin",
            Self::Welcome => "Welcome",
            Self::Subscription => "Subscription",
            Self::AdminLogin => "AdminLogin",
            Self::Testimonials => "Testimonials",
            Self::DailySummary => "DailySummary",
        }
    }

    /// Case-insensitive lookup by page name.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|page| page.as_str().eq_ignore_ascii_case(name))
    }

    /// Resolve a browser path to a page.
    ///
    /// Takes the last path segment (ignoring one trailing slash and any query
    /// string). Unknown or empty segments fall back to the first page.
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.strip_suffix('/').unwrap_or(path);
        let last = trimmed.rsplit('/').next().unwrap_or("");
        let segment = last.split('?').next().unwrap_or("");
        Self::parse(segment).unwrap_or(Self::ALL[0])
    }

    /// Router URL for this page.
    pub fn url(&self) -> String {
        format!("/{}", self.as_str())
    }

    pub fn is_public(&self) -> bool {
        Self::PUBLIC.contains(self)
    }

    /// Onboarding pages an authenticated visitor is always sent away from.
    pub fn is_onboarding(&self) -> bool {
        matches!(self, Self::Welcome | Self::Disclaimer)
    }
}

/// Strict lookup: unlike [`PageId::from_path`] there is no fallback page.
impl FromStr for PageId {
    type Err = CompanionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| CompanionError::UnknownPage {
            path: s.to_string(),
        })
    }
}

impl std::fmt::Display for PageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

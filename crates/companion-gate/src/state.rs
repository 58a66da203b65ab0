//! Gate states and per-navigation outcomes.

use serde::Serialize;

use companion_core::PageId;

/// Where a navigation currently stands.
///
/// ```text
/// Uninitialized → Checking → { Anonymous | NeedsDisclaimer | NeedsSubscription | Admitted }
/// ```
///
/// Every navigation starts again from `Uninitialized`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum GateState {
    #[default]
    Uninitialized,
    Checking,
    Anonymous,
    NeedsDisclaimer,
    NeedsSubscription,
    Admitted,
}

impl GateState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Checking => "checking",
            Self::Anonymous => "anonymous",
            Self::NeedsDisclaimer => "needs_disclaimer",
            Self::NeedsSubscription => "needs_subscription",
            Self::Admitted => "admitted",
        }
    }

    /// One of the four states a decision can end in.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Uninitialized | Self::Checking)
    }
}

/// Terminal result of one navigation: render, or exactly one redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GateOutcome {
    Render,
    Redirect(PageId),
}

impl GateOutcome {
    /// Redirect to `target` unless the visitor is already there.
    pub(crate) fn redirect_unless_at(requested: PageId, target: PageId) -> Self {
        if requested == target {
            Self::Render
        } else {
            Self::Redirect(target)
        }
    }
}

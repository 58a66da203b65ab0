//! The pure gate decision. No I/O: every input is already resolved.
//!
//! Rules, first match wins:
//! 1. Anonymous: render public pages, send everything else to the landing page.
//! 2. Authenticated on Welcome/Disclaimer: send home, profile not consulted.
//! 3. Admin: render.
//! 4. Disclaimer not acknowledged and no local agreement: send to Disclaimer.
//!    With local agreement, ask for the acknowledgment to be committed and continue.
//! 5. Trial expired: send to Subscription.

use chrono::{DateTime, Utc};

use companion_core::config::GateConfig;
use companion_core::{PageId, UserProfile, Visitor};

use crate::state::{GateOutcome, GateState};

/// Result of the auth lookup. Provider failures collapse into `Anonymous`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Anonymous,
    Authenticated(Visitor),
}

impl AuthState {
    pub fn visitor(&self) -> Option<&Visitor> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(visitor) => Some(visitor),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.visitor().is_some_and(Visitor::is_admin)
    }
}

#[derive(Debug, Clone)]
pub struct GateInput<'a> {
    pub requested: PageId,
    pub auth: &'a AuthState,
    /// `None` is read as a freshly created profile with store defaults.
    pub profile: Option<&'a UserProfile>,
    pub disclaimer_agreed_locally: bool,
    pub now: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub state: GateState,
    pub outcome: GateOutcome,
    /// The caller must persist `has_acknowledged_disclaimer = true` and then
    /// clear the local flag before acting on `outcome`.
    pub commit_disclaimer: bool,
}

impl Decision {
    fn new(state: GateState, outcome: GateOutcome) -> Self {
        Self {
            state,
            outcome,
            commit_disclaimer: false,
        }
    }
}

/// Whether the profile must be loaded before [`decide`] can give a final answer.
pub fn needs_profile(auth: &AuthState, requested: PageId) -> bool {
    matches!(auth, AuthState::Authenticated(_)) && !requested.is_onboarding()
}

/// Trial-bound (no status, empty or "trial") and either never started or
/// more than `trial_length_days` whole days old.
pub fn trial_expired(profile: Option<&UserProfile>, now: DateTime<Utc>, trial_length_days: i64) -> bool {
    let Some(profile) = profile else {
        return true;
    };
    if !profile.is_trial_bound() {
        return false;
    }
    match profile.days_since_trial_start(now) {
        Some(days) => days > trial_length_days,
        None => true,
    }
}

pub fn decide(input: &GateInput<'_>, config: &GateConfig) -> Decision {
    let requested = input.requested;

    let visitor = match input.auth {
        AuthState::Anonymous => {
            let outcome = if requested.is_public() {
                GateOutcome::Render
            } else {
                GateOutcome::Redirect(config.anonymous_landing)
            };
            return Decision::new(GateState::Anonymous, outcome);
        }
        AuthState::Authenticated(visitor) => visitor,
    };

    if requested.is_onboarding() {
        return Decision::new(
            GateState::Admitted,
            GateOutcome::Redirect(config.authenticated_home),
        );
    }

    if visitor.is_admin() {
        return Decision::new(GateState::Admitted, GateOutcome::Render);
    }

    let acknowledged = input.profile.is_some_and(|p| p.has_acknowledged_disclaimer);
    let commit_disclaimer = !acknowledged && input.disclaimer_agreed_locally;
    if !acknowledged && !commit_disclaimer {
        return Decision::new(
            GateState::NeedsDisclaimer,
            GateOutcome::redirect_unless_at(requested, PageId::Disclaimer),
        );
    }

    let (state, outcome) = if trial_expired(input.profile, input.now, config.trial_length_days) {
        (
            GateState::NeedsSubscription,
            GateOutcome::redirect_unless_at(requested, PageId::Subscription),
        )
    } else {
        (GateState::Admitted, GateOutcome::Render)
    };

    Decision {
        state,
        outcome,
        commit_disclaimer,
    }
}

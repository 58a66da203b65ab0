//! SessionGate: drives one navigation through auth lookup, profile
//! load-or-create, the pure decision, and the disclaimer commit.

use serde::Serialize;
use tracing::{debug, info, warn};

use companion_core::config::GateConfig;
use companion_core::{
    AuthProvider, CompanionErrorCode, CompanionResult, LocalFlags, PageId, ProfilePatch,
    ProfileStore, UserProfile, Visitor,
};

use crate::clock::{Clock, SystemClock};
use crate::decision::{decide, needs_profile, AuthState, GateInput};
use crate::state::{GateOutcome, GateState};

/// What one evaluation decided, and what it did along the way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GateReport {
    pub requested: PageId,
    pub state: GateState,
    pub outcome: GateOutcome,
    /// Recomputed from the auth provider on every evaluation.
    pub is_admin: bool,
    pub profile_created: bool,
    pub disclaimer_committed: bool,
}

pub struct SessionGate<A, P, F, C = SystemClock> {
    auth: A,
    profiles: P,
    flags: F,
    clock: C,
    config: GateConfig,
}

impl<A, P, F> SessionGate<A, P, F, SystemClock>
where
    A: AuthProvider,
    P: ProfileStore,
    F: LocalFlags,
{
    pub fn new(auth: A, profiles: P, flags: F, config: GateConfig) -> Self {
        Self::with_clock(auth, profiles, flags, SystemClock, config)
    }
}

impl<A, P, F, C> SessionGate<A, P, F, C>
where
    A: AuthProvider,
    P: ProfileStore,
    F: LocalFlags,
    C: Clock,
{
    pub fn with_clock(auth: A, profiles: P, flags: F, clock: C, config: GateConfig) -> Self {
        Self {
            auth,
            profiles,
            flags,
            clock,
            config,
        }
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    pub fn auth(&self) -> &A {
        &self.auth
    }

    /// Evaluate the gate for `requested`.
    ///
    /// Auth failures are treated as anonymous. Profile store and flag store
    /// failures propagate; if the disclaimer write fails the local flag stays
    /// set so the next navigation retries it.
    pub async fn evaluate(&self, requested: PageId) -> CompanionResult<GateReport> {
        debug!(page = %requested, state = GateState::Checking.as_str(), "Gate evaluation started");

        let auth = self.resolve_auth().await;
        let is_admin = auth.is_admin();
        let now = self.clock.now();

        let (profile, profile_created) = match auth.visitor() {
            Some(visitor) if needs_profile(&auth, requested) => {
                let (profile, created) = self.load_or_create_profile(visitor).await?;
                (Some(profile), created)
            }
            _ => (None, false),
        };

        let disclaimer_agreed_locally = match &profile {
            Some(p) if !is_admin && !p.has_acknowledged_disclaimer => {
                self.flags.is_set(&self.config.local_flag_key)?
            }
            _ => false,
        };

        let decision = decide(
            &GateInput {
                requested,
                auth: &auth,
                profile: profile.as_ref(),
                disclaimer_agreed_locally,
                now,
            },
            &self.config,
        );

        if decision.commit_disclaimer {
            if let Some(profile) = &profile {
                self.commit_disclaimer(profile).await?;
            }
        }

        let report = GateReport {
            requested,
            state: decision.state,
            outcome: decision.outcome,
            is_admin,
            profile_created,
            disclaimer_committed: decision.commit_disclaimer,
        };

        match report.outcome {
            GateOutcome::Render => debug!(
                page = %requested,
                state = report.state.as_str(),
                "Gate admits page"
            ),
            GateOutcome::Redirect(target) => info!(
                page = %requested,
                target = %target,
                state = report.state.as_str(),
                "Gate redirect"
            ),
        }
        Ok(report)
    }

    /// First phase of the disclaimer commit: remember the visitor's
    /// acceptance locally until a gate evaluation persists it.
    pub fn record_disclaimer_intent(&self) -> CompanionResult<()> {
        self.flags.set(&self.config.local_flag_key)?;
        info!(key = %self.config.local_flag_key, "Disclaimer acceptance recorded locally");
        Ok(())
    }

    async fn resolve_auth(&self) -> AuthState {
        match self.auth.current_visitor().await {
            Ok(visitor) => AuthState::Authenticated(visitor),
            Err(e) => {
                debug!(code = e.error_code(), reason = %e, "No session, treating visitor as anonymous");
                AuthState::Anonymous
            }
        }
    }

    async fn load_or_create_profile(&self, visitor: &Visitor) -> CompanionResult<(UserProfile, bool)> {
        let mut profiles = self.profiles.list_for_visitor(&visitor.id).await?;
        if profiles.len() > 1 {
            warn!(
                visitor = %visitor.id,
                count = profiles.len(),
                "Visitor has more than one profile, using the first"
            );
        }
        if !profiles.is_empty() {
            return Ok((profiles.swap_remove(0), false));
        }

        let profile = self
            .profiles
            .create(&visitor.id, ProfilePatch::default())
            .await?;
        info!(visitor = %visitor.id, profile = %profile.id, "Created profile for visitor");
        Ok((profile, true))
    }

    /// Second and third phases: write the acknowledgment, then drop the local
    /// intent. The write is idempotent, so a retry after a lost clear is safe.
    async fn commit_disclaimer(&self, profile: &UserProfile) -> CompanionResult<()> {
        if let Err(e) = self
            .profiles
            .update(&profile.id, ProfilePatch::acknowledge_disclaimer())
            .await
        {
            warn!(
                profile = %profile.id,
                code = e.error_code(),
                error = %e,
                "Disclaimer acknowledgment not persisted, local flag kept for retry"
            );
            return Err(e);
        }
        self.flags.clear(&self.config.local_flag_key)?;
        info!(profile = %profile.id, "Disclaimer acknowledgment committed");
        Ok(())
    }
}

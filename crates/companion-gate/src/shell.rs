//! AppShell: the layout every page renders inside.
//!
//! Resolves the browser path, runs the gate once per navigation, forwards at
//! most one redirect to the router, and always leaves the loading state when
//! the evaluation ends, whether it succeeded or not.

use tracing::{debug, info, warn};

use companion_core::models::{layout_for, LayoutChrome};
use companion_core::{
    AuthProvider, CompanionErrorCode, CompanionResult, LocalFlags, PageId, ProfileStore, Router,
};

use crate::clock::{Clock, SystemClock};
use crate::gate::{GateReport, SessionGate};
use crate::state::{GateOutcome, GateState};

/// Loading state for the navigation in flight.
#[derive(Debug, Default)]
struct Progress {
    state: GateState,
    initialized: bool,
    last_report: Option<GateReport>,
}

/// Ends a navigation on drop, including when the navigation future is
/// dropped mid-await. Anything short of a recorded report resets the state
/// machine to `Uninitialized`; `initialized` is always set.
struct Finalize<'a> {
    progress: &'a mut Progress,
}

impl<'a> Finalize<'a> {
    fn begin(progress: &'a mut Progress) -> Self {
        progress.state = GateState::Checking;
        progress.initialized = false;
        Self { progress }
    }

    fn complete(&mut self, report: GateReport) {
        self.progress.state = report.state;
        self.progress.last_report = Some(report);
    }
}

impl Drop for Finalize<'_> {
    fn drop(&mut self) {
        if !self.progress.state.is_terminal() {
            self.progress.state = GateState::Uninitialized;
            self.progress.last_report = None;
        }
        self.progress.initialized = true;
    }
}

pub struct AppShell<A, P, F, R, C = SystemClock> {
    gate: SessionGate<A, P, F, C>,
    router: R,
    current: Option<PageId>,
    progress: Progress,
}

impl<A, P, F, R, C> AppShell<A, P, F, R, C>
where
    A: AuthProvider,
    P: ProfileStore,
    F: LocalFlags,
    R: Router,
    C: Clock,
{
    pub fn new(gate: SessionGate<A, P, F, C>, router: R) -> Self {
        Self {
            gate,
            router,
            current: None,
            progress: Progress::default(),
        }
    }

    /// Handle a navigation to `path`.
    ///
    /// Returns the outcome that was acted on. On error nothing is redirected,
    /// the shell is still marked initialized so the page shows its normal
    /// empty state, and the error is returned to the caller.
    pub async fn navigate(&mut self, path: &str) -> CompanionResult<GateOutcome> {
        let page = PageId::from_path(path);
        self.current = Some(page);

        let mut finalize = Finalize::begin(&mut self.progress);
        match self.gate.evaluate(page).await {
            Ok(report) => {
                finalize.complete(report);
                drop(finalize);
                if let GateOutcome::Redirect(target) = report.outcome {
                    self.router.redirect(target);
                }
                Ok(report.outcome)
            }
            Err(e) => {
                drop(finalize);
                warn!(
                    page = %page,
                    code = e.error_code(),
                    error = %e,
                    "Gate evaluation failed, rendering page without gate decision"
                );
                Err(e)
            }
        }
    }

    /// False only while the gate is still checking.
    pub fn is_initialized(&self) -> bool {
        self.progress.initialized
    }

    pub fn state(&self) -> GateState {
        self.progress.state
    }

    pub fn current_page(&self) -> Option<PageId> {
        self.current
    }

    pub fn last_report(&self) -> Option<&GateReport> {
        self.progress.last_report.as_ref()
    }

    /// Admin status from the latest successful evaluation only.
    pub fn is_admin(&self) -> bool {
        self.progress.last_report.is_some_and(|r| r.is_admin)
    }

    /// Sidebar or bare chrome for the current page.
    pub fn layout(&self) -> LayoutChrome {
        layout_for(self.current.unwrap_or(PageId::ALL[0]), self.is_admin())
    }

    /// Welcome page action: hand off to the external login flow.
    pub async fn start_journey(&self) -> CompanionResult<()> {
        info!("Starting login flow");
        self.gate.auth().login().await?;
        Ok(())
    }

    /// Admin portal: visitors that are already signed in as admin go straight
    /// to the admin panel. Returns whether a redirect was issued.
    pub async fn admin_portal(&self) -> bool {
        match self.gate.auth().current_visitor().await {
            Ok(visitor) if visitor.is_admin() => {
                info!(visitor = %visitor.id, "Admin already signed in, opening admin panel");
                self.router.redirect(PageId::Admin);
                true
            }
            Ok(_) => false,
            Err(e) => {
                debug!(reason = %e, "Admin portal visited without a session");
                false
            }
        }
    }

    /// Disclaimer page action: record local agreement. The next navigation
    /// commits it to the profile.
    pub fn accept_disclaimer(&self) -> CompanionResult<()> {
        self.gate.record_disclaimer_intent()
    }
}

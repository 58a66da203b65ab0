//! # companion-gate
//!
//! Session gating for the application shell: on every navigation decide
//! whether the visitor sees the requested page or is redirected to
//! Disclaimer, Subscription or Dashboard.
//!
//! - `decision`: pure rule evaluation over resolved inputs
//! - `gate`: `SessionGate`, the async orchestration around it
//! - `shell`: `AppShell`, path resolution, router hand-off, layout
//! - `state`: `GateState` / `GateOutcome`
//! - `clock`: injectable time source for trial arithmetic

pub mod clock;
pub mod decision;
pub mod gate;
pub mod shell;
pub mod state;

pub use clock::{Clock, ManualClock, SystemClock};
pub use decision::{decide, trial_expired, AuthState, Decision, GateInput};
pub use gate::{GateReport, SessionGate};
pub use shell::AppShell;
pub use state::{GateOutcome, GateState};

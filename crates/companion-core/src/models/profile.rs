//! UserProfile: the one record per visitor the gate reads and patches.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Subscription status as stored on the profile.
///
/// Only "unset or trial" versus everything else matters to the gate;
/// unrecognised values (including "none") are preserved verbatim and are not
/// trial-bound.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SubscriptionStatus {
    /// Stored as an empty string. Reads the same as an absent status.
    Unset,
    Trial,
    Active,
    Other(String),
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Unset => "",
            Self::Trial => "trial",
            Self::Active => "active",
            Self::Other(s) => s,
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "" => Self::Unset,
            "trial" => Self::Trial,
            "active" => Self::Active,
            other => Self::Other(other.to_string()),
        }
    }

    /// True when the visitor is still relying on the free trial.
    pub fn is_trial_bound(&self) -> bool {
        matches!(self, Self::Unset | Self::Trial)
    }
}

impl From<String> for SubscriptionStatus {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<SubscriptionStatus> for String {
    fn from(status: SubscriptionStatus) -> Self {
        status.as_str().to_string()
    }
}

/// Persistent per-visitor profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub visitor_id: String,
    #[serde(default)]
    pub has_acknowledged_disclaimer: bool,
    #[serde(default)]
    pub subscription_status: Option<SubscriptionStatus>,
    #[serde(default)]
    pub trial_start_date: Option<DateTime<Utc>>,
}

impl UserProfile {
    /// A profile with store defaults: nothing acknowledged, no subscription, no trial.
    pub fn with_defaults(id: impl Into<String>, visitor_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            visitor_id: visitor_id.into(),
            has_acknowledged_disclaimer: false,
            subscription_status: None,
            trial_start_date: None,
        }
    }

    /// Whole days elapsed since the trial started, if it has.
    /// Negative when the start date lies in the future.
    pub fn days_since_trial_start(&self, now: DateTime<Utc>) -> Option<i64> {
        self.trial_start_date.map(|start| (now - start).num_days())
    }

    /// Absent and empty statuses count the same as "trial".
    pub fn is_trial_bound(&self) -> bool {
        self.subscription_status
            .as_ref()
            .map_or(true, SubscriptionStatus::is_trial_bound)
    }

    /// Apply a partial update in place. `None` fields are left untouched.
    pub fn apply(&mut self, patch: &ProfilePatch) {
        if let Some(ack) = patch.has_acknowledged_disclaimer {
            self.has_acknowledged_disclaimer = ack;
        }
        if let Some(status) = &patch.subscription_status {
            self.subscription_status = Some(status.clone());
        }
        if let Some(start) = patch.trial_start_date {
            self.trial_start_date = Some(start);
        }
    }
}

/// Partial profile fields for create and update calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfilePatch {
    pub has_acknowledged_disclaimer: Option<bool>,
    pub subscription_status: Option<SubscriptionStatus>,
    pub trial_start_date: Option<DateTime<Utc>>,
}

impl ProfilePatch {
    /// The only write the session gate ever issues.
    pub fn acknowledge_disclaimer() -> Self {
        Self {
            has_acknowledged_disclaimer: Some(true),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.has_acknowledged_disclaimer.is_none()
            && self.subscription_status.is_none()
            && self.trial_start_date.is_none()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn status_string_round_trip_preserves_unknown_values() {
        for raw in ["none", "trial", "active", "past_due"] {
            assert_eq!(SubscriptionStatus::parse(raw).as_str(), raw);
        }
        assert_eq!(
            SubscriptionStatus::parse("past_due"),
            SubscriptionStatus::Other("past_due".to_string())
        );
    }

    #[test]
    fn none_is_an_opaque_non_trial_status() {
        let none = SubscriptionStatus::parse("none");
        assert_eq!(none, SubscriptionStatus::Other("none".to_string()));
        assert!(!none.is_trial_bound());
        assert!(SubscriptionStatus::parse("").is_trial_bound());
    }

    #[test]
    fn absent_status_is_trial_bound() {
        let mut profile = UserProfile::with_defaults("p1", "v1");
        assert!(profile.is_trial_bound());
        profile.subscription_status = Some(SubscriptionStatus::Active);
        assert!(!profile.is_trial_bound());
        profile.subscription_status = Some(SubscriptionStatus::Other("cancelled".into()));
        assert!(!profile.is_trial_bound());
    }

    #[test]
    fn days_since_trial_start_truncates_partial_days() {
        let now = Utc::now();
        let mut profile = UserProfile::with_defaults("p1", "v1");
        assert_eq!(profile.days_since_trial_start(now), None);
        profile.trial_start_date = Some(now - Duration::days(10) - Duration::hours(23));
        assert_eq!(profile.days_since_trial_start(now), Some(10));
    }

    #[test]
    fn apply_leaves_unset_fields_alone() {
        let mut profile = UserProfile::with_defaults("p1", "v1");
        profile.subscription_status = Some(SubscriptionStatus::Trial);
        profile.apply(&ProfilePatch::acknowledge_disclaimer());
        assert!(profile.has_acknowledged_disclaimer);
        assert_eq!(profile.subscription_status, Some(SubscriptionStatus::Trial));
    }

    #[test]
    fn profile_deserializes_with_missing_fields() {
        let profile: UserProfile =
            serde_json::from_str(r#"{"id":"p1","visitor_id":"v1","subscription_status":"trial"}"#)
                .unwrap();
        assert!(!profile.has_acknowledged_disclaimer);
        assert_eq!(profile.subscription_status, Some(SubscriptionStatus::Trial));
        assert!(profile.trial_start_date.is_none());
    }
}

use crate::error::NatalError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// SubscriptionTier
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionTier {
    Free,
    Premium,
}

impl SubscriptionTier {
    pub fn as_str(self) -> &'static str {
        match self {
            SubscriptionTier::Free => "free",
            SubscriptionTier::Premium => "premium",
        }
    }

    pub fn limits(self) -> UserLimits {
        match self {
            SubscriptionTier::Free => UserLimits {
                max_reading_history: Some(30),
                can_access_ppf: false,
                has_ai_context: false,
            },
            SubscriptionTier::Premium => UserLimits {
                max_reading_history: None,
                can_access_ppf: true,
                has_ai_context: true,
            },
        }
    }
}

impl fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SubscriptionTier {
    type Err = NatalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free" => Ok(SubscriptionTier::Free),
            "premium" => Ok(SubscriptionTier::Premium),
            _ => Err(NatalError::InvalidTier(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// UserLimits
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserLimits {
    /// Readings kept in history; `None` is unlimited.
    pub max_reading_history: Option<u32>,
    /// Past/present/future spread.
    pub can_access_ppf: bool,
    /// Whether insight generation may draw on earlier readings.
    pub has_ai_context: bool,
}

// ---------------------------------------------------------------------------
// Subscription
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: Uuid,
    pub user_id: Uuid,
    pub tier: SubscriptionTier,
    pub start_date: DateTime<Utc>,
    /// Absent for the free tier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<DateTime<Utc>>,
    pub is_active: bool,
    #[serde(default)]
    pub auto_renew: bool,
}

impl Subscription {
    /// The row every account gets when onboarding finds none.
    pub fn free(user_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            tier: SubscriptionTier::Free,
            start_date: Utc::now(),
            expiry_date: None,
            is_active: true,
            auto_renew: false,
        }
    }

    pub fn is_premium(&self) -> bool {
        self.tier == SubscriptionTier::Premium && self.is_active
    }

    /// Limits in force. An inactive premium subscription falls back to free.
    pub fn limits(&self) -> UserLimits {
        if self.is_premium() {
            SubscriptionTier::Premium.limits()
        } else {
            SubscriptionTier::Free.limits()
        }
    }
}

/// Limits for a user who may have no subscription row at all.
pub fn limits_for(subscription: Option<&Subscription>) -> UserLimits {
    subscription
        .map(Subscription::limits)
        .unwrap_or_else(|| SubscriptionTier::Free.limits())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

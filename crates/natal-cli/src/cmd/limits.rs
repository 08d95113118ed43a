use crate::output::{print_fields, print_json};
use anyhow::Context;
use natal_core::subscription::{limits_for, Subscription, SubscriptionTier};
use uuid::Uuid;

pub fn run(tier: Option<&str>, inactive: bool, json: bool) -> anyhow::Result<()> {
    let subscription = match tier {
        Some(t) => {
            let tier: SubscriptionTier = t
                .parse()
                .with_context(|| format!("unknown tier '{t}' (expected free or premium)"))?;
            Some(Subscription {
                tier,
                is_active: !inactive,
                ..Subscription::free(Uuid::nil())
            })
        }
        None => None,
    };
    let limits = limits_for(subscription.as_ref());
    let premium = subscription.as_ref().is_some_and(Subscription::is_premium);

    if json {
        print_json(&serde_json::json!({
            "isPremium": premium,
            "limits": limits,
        }))?;
    } else {
        let history = limits
            .max_reading_history
            .map(|n| n.to_string())
            .unwrap_or_else(|| "unlimited".to_string());
        print_fields(&[
            ("Premium", premium.to_string()),
            ("Reading history", history),
            ("Past/present/future", limits.can_access_ppf.to_string()),
            ("AI context", limits.has_ai_context.to_string()),
        ]);
    }
    Ok(())
}

use crate::output::{print_fields, print_json};
use anyhow::Context;
use natal_core::config::Config;
use natal_core::subscription::Subscription;
use natal_core::validation::{complete_onboarding, OnboardingParams};
use natal_core::NatalError;
use std::path::Path;
use uuid::Uuid;

pub fn run(root: &Path, user_id: Uuid, params: OnboardingParams, json: bool) -> anyhow::Result<()> {
    let config = Config::load_or_default(root).context("failed to load config")?;
    let today = chrono::Utc::now().date_naive();

    let update = match complete_onboarding(&params, user_id, &config.validation, today) {
        Ok(update) => update,
        Err(NatalError::Validation(errors)) => {
            if json {
                print_json(&serde_json::json!({ "errors": errors }))?;
            } else {
                for e in &errors {
                    eprintln!("  {}: {}", e.field, e.message);
                }
            }
            anyhow::bail!("onboarding input rejected ({} problem(s))", errors.len());
        }
        Err(e) => return Err(e).context("onboarding failed"),
    };

    // Row to insert when the account has no subscription yet.
    let subscription = Subscription::free(user_id);

    if json {
        print_json(&serde_json::json!({
            "profile": update,
            "subscription": subscription,
        }))?;
    } else {
        print_fields(&[
            ("User", update.id.to_string()),
            ("Name", update.display_name.clone()),
            ("Born", format!("{} {}", update.birth_date, update.birth_time)),
            ("Place", update.birth_location.clone()),
            ("Sun", update.sun_sign.to_string()),
            ("Moon", update.moon_sign.to_string()),
            ("Rising", update.rising_sign.to_string()),
            ("Tier", subscription.tier.to_string()),
        ]);
    }
    Ok(())
}

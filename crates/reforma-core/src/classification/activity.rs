use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::normalize::{contains_keyword, normalize};
use crate::config::ReformConfig;
use crate::types::{ActivityType, Rate};

/// Category keywords that select an activity type. Checked in order;
/// anything unmatched is a [`ActivityType::Service`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRule {
    pub activity_type: ActivityType,
    pub keywords: Vec<String>,
}

/// Fraction of revenue assumed to be creditable input cost, per activity type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditRatios {
    pub commerce: Rate,
    pub industry: Rate,
    pub service: Rate,
    pub agriculture: Rate,
}

impl CreditRatios {
    pub fn for_activity(&self, activity: ActivityType) -> Rate {
        match activity {
            ActivityType::Commerce => self.commerce,
            ActivityType::Industry => self.industry,
            ActivityType::Service => self.service,
            ActivityType::Agriculture => self.agriculture,
        }
    }
}

impl Default for CreditRatios {
    fn default() -> Self {
        CreditRatios {
            commerce: dec!(0.65),
            industry: dec!(0.55),
            service: dec!(0.15),
            agriculture: dec!(0.50),
        }
    }
}

/// Map an activity category to its coarse activity type.
///
/// Defaults to `Service`, which carries the lowest credit ratio, so an
/// unrecognised category never receives an optimistic credit assumption.
pub fn classify_activity_type(category: &str, config: &ReformConfig) -> ActivityType {
    let category = normalize(category);
    let activity = config
        .activity_rules
        .iter()
        .find(|r| r.keywords.iter().any(|k| contains_keyword(&category, k)))
        .map(|r| r.activity_type)
        .unwrap_or(ActivityType::Service);
    tracing::debug!(%activity, "activity type classified");
    activity
}

fn rule(activity_type: ActivityType, keywords: &[&str]) -> ActivityRule {
    ActivityRule {
        activity_type,
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
    }
}

/// Activity rules in matching order.
pub fn reference_activity_rules() -> Vec<ActivityRule> {
    vec![
        rule(
            ActivityType::Commerce,
            &["comercio", "varej", "atacad", "revenda", "loja"],
        ),
        rule(
            ActivityType::Industry,
            &["industri", "fabrica", "manufatur", "transformacao"],
        ),
        rule(
            ActivityType::Agriculture,
            &["agro", "pecuari", "agricult", "rural", "extrativ"],
        ),
    ]
}

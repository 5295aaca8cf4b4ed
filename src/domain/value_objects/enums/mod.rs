pub mod billing_cycles;
pub mod feature_keys;
pub mod item_statuses;
pub mod plan_tiers;

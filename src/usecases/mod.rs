pub mod feature_gate;
pub mod upgrade;
pub mod usage_aggregator;

pub mod enums;
pub mod iam;
pub mod payments;
pub mod plan_limits;
pub mod subscriptions;
pub mod usage;

pub mod checkout;
pub mod counts;
pub mod payments;
pub mod subscriptions;

pub mod api_client;
pub mod count_providers;
pub mod payments;
pub mod subscriptions;

pub mod agents;
pub mod brands;
pub mod client;
pub mod groups;
pub mod models;
pub mod satisfaction_ratings;
pub mod ticket_events;
pub mod ticket_metrics;
pub mod tickets;

#[cfg(test)]
pub mod test_support;

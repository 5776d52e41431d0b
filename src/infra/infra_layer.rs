// The infra module contains implementations of core traits.
// Each feature implementation goes in its own submodule.

#[path = "google/mod.rs"]
pub mod google;

#[path = "credentials/mod.rs"]
pub mod credentials;

#[path = "slack/mod.rs"]
pub mod slack;

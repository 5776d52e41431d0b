// The core module contains all business logic.
// Each feature gets its own submodule.

#[path = "auth/mod.rs"]
pub mod auth;

#[path = "roster/mod.rs"]
pub mod roster;

#[path = "notify/notify_models.rs"]
pub mod notify;

#[path = "birthdays/mod.rs"]
pub mod birthdays;

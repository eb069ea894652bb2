pub mod courses;
pub mod provider_tokens;
pub mod provider_types;
pub mod providers;
pub mod refresh_tokens;
pub mod roles;
pub mod sessions;
pub mod tasks;
pub mod test_results;
pub mod themes;
pub mod users;

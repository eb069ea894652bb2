pub mod config;
pub mod cookie;
pub mod domain;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod infra;
pub mod router;
pub mod serde;
pub mod state;
pub mod usecase;

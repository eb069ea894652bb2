pub mod cache;
pub mod db;
pub mod executor;
pub mod yandex;

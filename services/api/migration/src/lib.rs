use sea_orm_migration::prelude::*;

mod m20250915_000001_create_roles;
mod m20250915_000002_create_provider_types;
mod m20250915_000003_create_users;
mod m20250915_000004_create_providers;
mod m20250915_000005_create_provider_tokens;
mod m20250915_000006_create_refresh_tokens;
mod m20250915_000007_create_sessions;
mod m20250915_000008_create_courses;
mod m20250915_000009_create_themes;
mod m20250915_000010_create_tasks;
mod m20250915_000012_create_test_results;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250915_000001_create_roles::Migration),
            Box::new(m20250915_000002_create_provider_types::Migration),
            Box::new(m20250915_000003_create_users::Migration),
            Box::new(m20250915_000004_create_providers::Migration),
            Box::new(m20250915_000005_create_provider_tokens::Migration),
            Box::new(m20250915_000006_create_refresh_tokens::Migration),
            Box::new(m20250915_000007_create_sessions::Migration),
            Box::new(m20250915_000008_create_courses::Migration),
            Box::new(m20250915_000009_create_themes::Migration),
            Box::new(m20250915_000010_create_tasks::Migration),
            Box::new(m20250915_000011_create_task_tests::Migration),
            Box::new(m20250915_000012_create_test_results::Migration),
        ]
    }
}

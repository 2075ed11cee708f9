//! Schema migrations for the posts table.
//!
//! The API server applies these on startup when `AUTO_MIGRATE` is enabled;
//! the `migration` binary runs them by hand.

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_posts_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20240101_000001_create_posts_table::Migration)]
    }
}

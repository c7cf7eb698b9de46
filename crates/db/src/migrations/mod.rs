//! Database migrations.
//!
//! Schema migrations for the database.

#![allow(missing_docs)]

use sea_orm_migration::prelude::*;

mod m20250601_000001_create_users_table;
mod m20250601_000002_create_tweets_table;
mod m20250601_000003_create_follows_table;
mod m20250601_000004_create_likes_table;
mod m20250601_000005_create_media_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_users_table::Migration),
            Box::new(m20250601_000002_create_tweets_table::Migration),
            Box::new(m20250601_000003_create_follows_table::Migration),
            Box::new(m20250601_000004_create_likes_table::Migration),
            Box::new(m20250601_000005_create_media_table::Migration),
        ]
    }
}

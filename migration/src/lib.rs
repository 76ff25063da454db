pub use sea_orm_migration::prelude::*;

mod m20260801_000001_create_users_table;
mod m20260801_000002_create_profile_tables;
mod m20260801_000003_create_contracts_table;
mod m20260801_000004_create_criteria_tables;
mod m20260801_000005_create_deals_table;
mod m20260801_000006_create_terms_tables;
mod m20260801_000007_create_media_table;
mod m20260801_000008_create_rooms_tables;
mod m20260801_000009_create_messages_table;
mod m20260801_000010_create_notifications_table;
mod m20260801_000011_create_signatures_table;
mod m20260801_000012_create_refresh_tokens_table;
mod m20260801_000013_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260801_000001_create_users_table::Migration),
            Box::new(m20260801_000002_create_profile_tables::Migration),
            Box::new(m20260801_000003_create_contracts_table::Migration),
            Box::new(m20260801_000004_create_criteria_tables::Migration),
            Box::new(m20260801_000005_create_deals_table::Migration),
            Box::new(m20260801_000006_create_terms_tables::Migration),
            Box::new(m20260801_000007_create_media_table::Migration),
            Box::new(m20260801_000008_create_rooms_tables::Migration),
            Box::new(m20260801_000009_create_messages_table::Migration),
            Box::new(m20260801_000010_create_notifications_table::Migration),
            Box::new(m20260801_000011_create_signatures_table::Migration),
            Box::new(m20260801_000012_create_refresh_tokens_table::Migration),
            Box::new(m20260801_000013_add_indexes::Migration),
        ]
    }
}

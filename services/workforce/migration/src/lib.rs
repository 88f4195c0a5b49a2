pub use sea_orm_migration::prelude::*;

mod m20261001_000001_create_users;
mod m20261001_000002_create_sites;
mod m20261001_000003_create_assignments;
mod m20261001_000004_create_messaging;
mod m20261001_000005_create_ledger_entries;
mod m20261001_000006_create_documents_and_meetings;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261001_000001_create_users::Migration),
            Box::new(m20261001_000002_create_sites::Migration),
            Box::new(m20261001_000003_create_assignments::Migration),
            Box::new(m20261001_000004_create_messaging::Migration),
            Box::new(m20261001_000005_create_ledger_entries::Migration),
            Box::new(m20261001_000006_create_documents_and_meetings::Migration),
        ]
    }
}

use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(guardpost_workforce_migration::Migrator).await;
}

pub use sea_orm_migration::prelude::*;

mod m20250512_000001_create_users;
mod m20250512_000002_create_sessions;
mod m20250512_000003_create_categories;
mod m20250512_000004_create_products;
mod m20250512_000005_create_redemption_codes;
mod m20250512_000006_create_code_products;
mod m20250512_000007_create_claim_records;
mod m20250512_000008_create_gallery_items;
mod m20250512_000009_create_site_content;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250512_000001_create_users::Migration),
            Box::new(m20250512_000002_create_sessions::Migration),
            Box::new(m20250512_000003_create_categories::Migration),
            Box::new(m20250512_000004_create_products::Migration),
            Box::new(m20250512_000005_create_redemption_codes::Migration),
            Box::new(m20250512_000006_create_code_products::Migration),
            Box::new(m20250512_000007_create_claim_records::Migration),
            Box::new(m20250512_000008_create_gallery_items::Migration),
            Box::new(m20250512_000009_create_site_content::Migration),
        ]
    }
}

//! Creates the `assets` table.
//!
//! One row per asset. The payload itself lives in object storage under a key
//! derived from `id`; this table only tracks the lifecycle status.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(ASSETS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS assets;").await?;
        Ok(())
    }
}

const ASSETS_SQL: &str = r"
CREATE TABLE assets (
    id UUID PRIMARY KEY,
    status VARCHAR(16) NOT NULL DEFAULT 'created',
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT chk_assets_status CHECK (status IN ('created', 'uploaded')),
    CONSTRAINT chk_assets_updated_after_created CHECK (updated_at >= created_at)
);

COMMENT ON TABLE assets IS 'Lifecycle records for uploaded binary assets';
COMMENT ON COLUMN assets.status IS 'created until the upload is confirmed, then uploaded';
";

//! Initial database migration.
//!
//! Creates the province reference table, the sales fact table and the three
//! target tables. Target quantities and period names stay text; they are
//! parsed when read.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(PROVINCES_SQL).await?;
        db.execute_unprepared(SALES_SQL).await?;
        db.execute_unprepared(TARGETS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_SQL).await?;
        Ok(())
    }
}

const PROVINCES_SQL: &str = r"
CREATE TABLE IF NOT EXISTS provinces (
    id UUID PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    country_id UUID,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    deleted_at TIMESTAMPTZ
);

CREATE INDEX IF NOT EXISTS idx_provinces_name ON provinces (name) WHERE deleted_at IS NULL;
";

// No foreign key on province_id: deleting a province leaves its history.
const SALES_SQL: &str = r"
CREATE TABLE IF NOT EXISTS sales (
    id UUID PRIMARY KEY,
    province_id UUID NOT NULL,
    product_id UUID NOT NULL,
    user_id UUID NOT NULL,
    quantity BIGINT NOT NULL CHECK (quantity >= 0),
    occurred_at TIMESTAMPTZ NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    deleted_at TIMESTAMPTZ
);

CREATE INDEX IF NOT EXISTS idx_sales_occurred_at ON sales (occurred_at) WHERE deleted_at IS NULL;
CREATE INDEX IF NOT EXISTS idx_sales_province_occurred_at ON sales (province_id, occurred_at) WHERE deleted_at IS NULL;
";

const TARGETS_SQL: &str = r"
CREATE TABLE IF NOT EXISTS years (
    id UUID PRIMARY KEY,
    year INTEGER NOT NULL UNIQUE,
    quantity TEXT NOT NULL DEFAULT '0',
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE IF NOT EXISTS months (
    id UUID PRIMARY KEY,
    year_id UUID NOT NULL REFERENCES years (id) ON DELETE CASCADE,
    province_id UUID NOT NULL,
    month VARCHAR(20) NOT NULL,
    quantity TEXT NOT NULL DEFAULT '0'
);

CREATE INDEX IF NOT EXISTS idx_months_year_province ON months (year_id, province_id);

CREATE TABLE IF NOT EXISTS weeks (
    id UUID PRIMARY KEY,
    year_id UUID NOT NULL REFERENCES years (id) ON DELETE CASCADE,
    province_id UUID NOT NULL,
    week VARCHAR(20) NOT NULL,
    quantity TEXT NOT NULL DEFAULT '0'
);

CREATE INDEX IF NOT EXISTS idx_weeks_year_province ON weeks (year_id, province_id);
";

const DROP_SQL: &str = r"
DROP TABLE IF EXISTS weeks;
DROP TABLE IF EXISTS months;
DROP TABLE IF EXISTS years;
DROP TABLE IF EXISTS sales;
DROP TABLE IF EXISTS provinces;
";

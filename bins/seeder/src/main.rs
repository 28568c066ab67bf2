//! Database seeder for Salesdash development and testing.
//!
//! Seeds four provinces, targets for the current year (year, month and ISO
//! week) and about two months of demo sales spread over the entry slots.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use chrono::{Datelike, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use salesdash_core::calendar::month_name;
use salesdash_core::facts::NewSale;
use salesdash_db::SaleRepository;
use salesdash_db::entities::{months, provinces, weeks, years};
use salesdash_shared::types::{ProductId, ProvinceId, UserId};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

/// Provinces with fixed IDs so tokens minted for local testing stay valid.
const PROVINCES: [(u128, &str, i64); 4] = [
    (0x0000_0000_0000_0000_0000_0000_0000_0101, "Haut-Katanga", 40),
    (0x0000_0000_0000_0000_0000_0000_0000_0102, "Kinshasa", 55),
    (0x0000_0000_0000_0000_0000_0000_0000_0103, "Kongo-Central", 25),
    (0x0000_0000_0000_0000_0000_0000_0000_0104, "Lualaba", 30),
];

/// Local entry hours, one inside each reporting slot.
const ENTRY_HOURS: [u32; 4] = [8, 11, 14, 19];

const DEMO_DAYS: i64 = 60;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let tz: Tz = std::env::var("SALESDASH__REPORTING__TIMEZONE")
        .unwrap_or_else(|_| "UTC".to_string())
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid timezone: {e}"))?;

    println!("Connecting to database...");
    let db = salesdash_db::connect(&database_url).await?;

    println!("Seeding provinces...");
    let fresh = seed_provinces(&db).await?;
    if !fresh {
        println!("  Provinces already exist, skipping the rest...");
        return Ok(());
    }

    let today = Utc::now().with_timezone(&tz).date_naive();
    println!("Seeding targets for {}...", today.year());
    seed_targets(&db, today.year()).await?;

    println!("Seeding {DEMO_DAYS} days of sales...");
    seed_sales(&db, tz, today).await?;

    println!("Seeding complete!");
    Ok(())
}

/// Inserts the provinces; returns false if they were already there.
async fn seed_provinces(db: &DatabaseConnection) -> anyhow::Result<bool> {
    let (first, _, _) = PROVINCES[0];
    if provinces::Entity::find_by_id(Uuid::from_u128(first))
        .one(db)
        .await?
        .is_some()
    {
        return Ok(false);
    }

    for (id, name, _) in PROVINCES {
        provinces::ActiveModel {
            id: Set(Uuid::from_u128(id)),
            name: Set(name.to_string()),
            country_id: Set(None),
            created_at: Set(Utc::now().into()),
            deleted_at: Set(None),
        }
        .insert(db)
        .await?;
    }
    Ok(true)
}

/// Yearly objective plus month targets for every province and week targets
/// for all but the last one, which exercises the yearly fallback.
async fn seed_targets(db: &DatabaseConnection, year: i32) -> anyhow::Result<()> {
    let year_id = Uuid::now_v7();
    let daily_total: i64 = PROVINCES.iter().map(|(_, _, daily)| daily).sum();
    years::ActiveModel {
        id: Set(year_id),
        year: Set(year),
        quantity: Set((daily_total * 365).to_string()),
        created_at: Set(Utc::now().into()),
    }
    .insert(db)
    .await?;

    for (index, (id, _, daily)) in PROVINCES.iter().enumerate() {
        for month in 1..=12 {
            months::ActiveModel {
                id: Set(Uuid::now_v7()),
                year_id: Set(year_id),
                province_id: Set(Uuid::from_u128(*id)),
                month: Set(month_name(month).to_string()),
                quantity: Set((daily * 30).to_string()),
            }
            .insert(db)
            .await?;
        }

        if index + 1 == PROVINCES.len() {
            continue;
        }
        for week in 1..=52 {
            weeks::ActiveModel {
                id: Set(Uuid::now_v7()),
                year_id: Set(year_id),
                province_id: Set(Uuid::from_u128(*id)),
                week: Set(format!("W{week}")),
                quantity: Set((daily * 7).to_string()),
            }
            .insert(db)
            .await?;
        }
    }
    Ok(())
}

/// Deterministic demo sales around each province's daily pace.
async fn seed_sales(db: &DatabaseConnection, tz: Tz, today: NaiveDate) -> anyhow::Result<()> {
    let repo = SaleRepository::new(db.clone(), tz);
    let user_id = UserId::from_uuid(Uuid::from_u128(0x0201));
    let product_id = ProductId::from_uuid(Uuid::from_u128(0x0301));

    for offset in 0..DEMO_DAYS {
        let day = today - Duration::days(offset);
        for (index, (id, _, daily)) in PROVINCES.iter().enumerate() {
            for (slot, hour) in ENTRY_HOURS.iter().enumerate() {
                // Spread the daily pace over the slots with some day-to-day swing.
                let swing = (offset * 7 + i64::try_from(index * 5 + slot * 3)?) % 9 - 4;
                let quantity = (daily / 4 + swing).max(0);
                let Some(local) = day.and_hms_opt(*hour, 15, 0) else {
                    continue;
                };
                let Some(occurred_at) = tz.from_local_datetime(&local).earliest() else {
                    continue;
                };
                repo.create(NewSale {
                    province_id: ProvinceId::from_uuid(Uuid::from_u128(*id)),
                    product_id,
                    user_id,
                    quantity,
                    occurred_at: occurred_at.with_timezone(&Utc),
                })
                .await?;
            }
        }
    }
    Ok(())
}

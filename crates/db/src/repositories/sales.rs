//! Sale repository: the single write path into the fact table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use salesdash_core::facts::{FactError, NewSale, SaleEvent, SaleStore};
use salesdash_shared::types::{ProductId, ProvinceId, SaleId, UserId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};
use thiserror::Error;
use tracing::info;

use super::facts::fact_error;
use crate::entities::{provinces, sales};

/// Errors raised while recording or removing a sale.
#[derive(Debug, Error)]
pub enum SaleError {
    /// Negative quantities never enter the store.
    #[error("Quantity must not be negative: {0}")]
    NegativeQuantity(i64),

    /// The province does not exist or was deleted.
    #[error("Province not found: {0}")]
    ProvinceNotFound(ProvinceId),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<SaleError> for FactError {
    fn from(err: SaleError) -> Self {
        match err {
            SaleError::Database(db) => fact_error(db),
            rejected => Self::Rejected(rejected.to_string()),
        }
    }
}

/// Sale repository for inserts and logical deletes.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    db: DatabaseConnection,
    tz: Tz,
}

impl SaleRepository {
    /// Creates a new sale repository; `tz` renders stored instants as local time.
    #[must_use]
    pub const fn new(db: DatabaseConnection, tz: Tz) -> Self {
        Self { db, tz }
    }

    fn to_event(&self, row: sales::Model) -> SaleEvent {
        SaleEvent {
            id: SaleId::from_uuid(row.id),
            province_id: ProvinceId::from_uuid(row.province_id),
            product_id: ProductId::from_uuid(row.product_id),
            user_id: UserId::from_uuid(row.user_id),
            quantity: row.quantity,
            occurred_at: row.occurred_at.with_timezone(&self.tz).naive_local(),
        }
    }

    /// Records a sale.
    ///
    /// # Errors
    ///
    /// Returns `SaleError::NegativeQuantity` for a negative quantity,
    /// `SaleError::ProvinceNotFound` for an unknown province, or a database
    /// error if the insert fails.
    pub async fn create(&self, sale: NewSale) -> Result<SaleEvent, SaleError> {
        if sale.quantity < 0 {
            return Err(SaleError::NegativeQuantity(sale.quantity));
        }

        let province = provinces::Entity::find_by_id(sale.province_id.into_inner())
            .filter(provinces::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?;
        if province.is_none() {
            return Err(SaleError::ProvinceNotFound(sale.province_id));
        }

        let now: DateTime<Utc> = Utc::now();
        let row = sales::ActiveModel {
            id: Set(SaleId::new().into_inner()),
            province_id: Set(sale.province_id.into_inner()),
            product_id: Set(sale.product_id.into_inner()),
            user_id: Set(sale.user_id.into_inner()),
            quantity: Set(sale.quantity),
            occurred_at: Set(sale.occurred_at.into()),
            created_at: Set(now.into()),
            deleted_at: Set(None),
        }
        .insert(&self.db)
        .await?;

        info!(
            sale_id = %row.id,
            province_id = %row.province_id,
            quantity = row.quantity,
            "Sale recorded"
        );
        Ok(self.to_event(row))
    }

    /// Finds a live sale by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: SaleId) -> Result<Option<SaleEvent>, SaleError> {
        let row = sales::Entity::find_by_id(id.into_inner())
            .filter(sales::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?;
        Ok(row.map(|row| self.to_event(row)))
    }

    /// Logically deletes a sale. Returns false if it was already gone.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn soft_delete(&self, id: SaleId) -> Result<bool, SaleError> {
        let now: DateTime<Utc> = Utc::now();
        let result = sales::Entity::update_many()
            .col_expr(sales::Column::DeletedAt, sea_orm::sea_query::Expr::value(now))
            .filter(sales::Column::Id.eq(id.into_inner()))
            .filter(sales::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}

#[async_trait]
impl SaleStore for SaleRepository {
    async fn record_sale(&self, sale: NewSale) -> Result<SaleEvent, FactError> {
        self.create(sale).await.map_err(FactError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_sales_become_rejections() {
        let err = FactError::from(SaleError::NegativeQuantity(-3));
        assert_eq!(err, FactError::Rejected("Quantity must not be negative: -3".into()));

        let err = FactError::from(SaleError::ProvinceNotFound(ProvinceId::new()));
        assert!(matches!(err, FactError::Rejected(_)));
    }

    #[test]
    fn test_database_failures_stay_store_errors() {
        let err = FactError::from(SaleError::Database(DbErr::RecordNotInserted));
        assert!(matches!(err, FactError::Query(_)));
    }
}

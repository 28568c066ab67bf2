//! `SeaORM` Entity for years table.
//!
//! The yearly objective is global, not per province. `quantity` is text.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "years")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub year: i32,
    pub quantity: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::months::Entity")]
    Months,
    #[sea_orm(has_many = "super::weeks::Entity")]
    Weeks,
}

impl Related<super::months::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Months.def()
    }
}

impl Related<super::weeks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Weeks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

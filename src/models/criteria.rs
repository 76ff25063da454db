use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// SeaORM entity for the `criteria` table (qualification filters on a contract).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "criteria")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub contract_id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::contracts::Entity",
        from = "Column::ContractId",
        to = "super::contracts::Column::Id"
    )]
    Contract,
    #[sea_orm(has_many = "super::sub_criteria::Entity")]
    SubCriteria,
}

impl Related<super::contracts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contract.def()
    }
}

impl Related<super::sub_criteria::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SubCriteria.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCriteria {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub sub_criteria: Vec<super::sub_criteria::CreateSubCriteria>,
}

/// Criteria with its nested sub-criteria, as returned on contract detail.
#[derive(Debug, Clone, Serialize)]
pub struct CriteriaWithSubs {
    #[serde(flatten)]
    pub criteria: Model,
    pub sub_criteria: Vec<super::sub_criteria::Model>,
}

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Number of distinct confirmers required before a term flips to Accepted.
pub const CONFIRMATION_THRESHOLD: u64 = 2;

/// Term status stored as a lowercase string in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum Status {
    #[sea_orm(string_value = "negotiating")]
    Negotiating,
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "accepted")]
    Accepted,
}

/// SeaORM entity for the `terms` table (negotiable clauses within a deal).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "terms")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub deal_id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub status: Status,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::deals::Entity",
        from = "Column::DealId",
        to = "super::deals::Column::Id"
    )]
    Deal,
    #[sea_orm(has_many = "super::term_confirmations::Entity")]
    Confirmations,
}

impl Related<super::deals::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Deal.def()
    }
}

impl Related<super::term_confirmations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Confirmations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// A term inside the deal-request body (no deal_id yet).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTermInput {
    pub title: String,
    pub description: String,
}

/// Body for `POST /api/terms` — adds a term to an existing deal.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTerm {
    pub deal_id: Uuid,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTerm {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Term plus its persisted confirmation count, as listed per deal.
#[derive(Debug, Clone, Serialize)]
pub struct TermWithConfirmations {
    #[serde(flatten)]
    pub term: Model,
    pub confirmations: u64,
}

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Deal status stored as a lowercase string in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum Status {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "accepted")]
    Accepted,
    #[sea_orm(string_value = "rejected")]
    Rejected,
    #[sea_orm(string_value = "completed")]
    Completed,
}

impl Status {
    /// Whether a deal may move from `self` to `next`. Pending deals can be
    /// accepted or rejected; accepted deals can be completed; everything
    /// else is final.
    pub fn may_become(&self, next: &Status) -> bool {
        matches!(
            (self, next),
            (Status::Pending, Status::Accepted)
                | (Status::Pending, Status::Rejected)
                | (Status::Accepted, Status::Completed)
        )
    }
}

/// SeaORM entity for the `deals` table.
///
/// A deal links a content creator to a company's contract. The pair
/// (contract_id, content_creator_id) is unique — one request per creator
/// per contract.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "deals")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub contract_id: Uuid,
    pub content_creator_id: Uuid,
    pub status: Status,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
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
    #[sea_orm(
        belongs_to = "super::creators::Entity",
        from = "Column::ContentCreatorId",
        to = "super::creators::Column::Id"
    )]
    ContentCreator,
    #[sea_orm(has_many = "super::terms::Entity")]
    Terms,
}

impl Related<super::contracts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contract.def()
    }
}

impl Related<super::creators::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContentCreator.def()
    }
}

impl Related<super::terms::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Terms.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Body for `POST /api/deals/request`. The creator id comes from the JWT.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDealRequest {
    pub contract_id: Uuid,
    pub price: f64,
    #[serde(default)]
    pub terms: Vec<super::terms::CreateTermInput>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_deals_can_be_accepted_or_rejected() {
        assert!(Status::Pending.may_become(&Status::Accepted));
        assert!(Status::Pending.may_become(&Status::Rejected));
        assert!(!Status::Pending.may_become(&Status::Completed));
    }

    #[test]
    fn accepted_deals_only_complete() {
        assert!(Status::Accepted.may_become(&Status::Completed));
        assert!(!Status::Accepted.may_become(&Status::Rejected));
        assert!(!Status::Accepted.may_become(&Status::Pending));
    }

    #[test]
    fn rejected_and_completed_are_final() {
        for terminal in [Status::Rejected, Status::Completed] {
            for next in [
                Status::Pending,
                Status::Accepted,
                Status::Rejected,
                Status::Completed,
            ] {
                assert!(!terminal.may_become(&next));
            }
        }
    }
}

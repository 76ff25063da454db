use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// SeaORM entity for the `content_creators` table (one-to-one with `users`).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "content_creators")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    #[sea_orm(column_type = "Text", nullable)]
    pub bio: Option<String>,
    pub category: Option<String>,
    pub audience_size: Option<i64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub pricing: Option<f64>,
    pub location: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
    #[sea_orm(has_many = "super::deals::Entity")]
    Deals,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::deals::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Deals.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Profile payload inside the registration body for the `content_creator` role.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCreatorProfile {
    pub bio: Option<String>,
    pub category: Option<String>,
    pub audience_size: Option<i64>,
    pub pricing: Option<f64>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCreator {
    pub bio: Option<String>,
    pub category: Option<String>,
    pub audience_size: Option<i64>,
    pub pricing: Option<f64>,
    pub location: Option<String>,
}

use sea_orm::*;
use uuid::Uuid;

use crate::models::companies::{self, UpdateCompany};

/// Fetch a company profile by its own ID.
pub async fn get_company_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<companies::Model>, DbErr> {
    companies::Entity::find_by_id(id).one(db).await
}

/// Fetch the company profile belonging to a user.
pub async fn get_company_by_user_id(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Option<companies::Model>, DbErr> {
    companies::Entity::find()
        .filter(companies::Column::UserId.eq(user_id))
        .one(db)
        .await
}

/// Update a company profile.
pub async fn update_company(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateCompany,
) -> Result<companies::Model, DbErr> {
    let company = companies::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Company not found".to_string()))?;

    let mut active: companies::ActiveModel = company.into();

    if let Some(name) = input.name {
        active.name = Set(name);
    }
    if let Some(industry) = input.industry {
        active.industry = Set(Some(industry));
    }
    if let Some(description) = input.description {
        active.description = Set(Some(description));
    }
    if let Some(website) = input.website {
        active.website = Set(Some(website));
    }
    if let Some(location) = input.location {
        active.location = Set(Some(location));
    }

    active.update(db).await
}

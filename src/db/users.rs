use sea_orm::*;
use uuid::Uuid;

use crate::models::users::{self, RegisterUser, Role, UpdateUser};
use crate::models::{companies, creators};

/// Insert a new user together with its role profile (company or content
/// creator) in one transaction — either both rows land or neither does.
///
/// The caller has already validated uniqueness and hashed the password.
pub async fn insert_user_with_profile(
    db: &DatabaseConnection,
    input: RegisterUser,
    password_hash: String,
) -> Result<users::Model, DbErr> {
    let txn = db.begin().await?;

    let user_id = Uuid::new_v4();
    let new_user = users::ActiveModel {
        id: Set(user_id),
        email: Set(input.email),
        username: Set(input.username),
        password_hash: Set(password_hash),
        display_name: Set(input.display_name),
        avatar_url: Set(None),
        role: Set(input.role.clone()),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };
    let user = new_user.insert(&txn).await?;

    match input.role {
        Role::Company => {
            let profile = input.company.ok_or(DbErr::Custom(
                "Company profile is required for the company role".to_string(),
            ))?;
            let new_company = companies::ActiveModel {
                id: Set(Uuid::new_v4()),
                user_id: Set(user_id),
                name: Set(profile.name),
                industry: Set(profile.industry),
                description: Set(profile.description),
                website: Set(profile.website),
                location: Set(profile.location),
                created_at: Set(chrono::Utc::now()),
            };
            new_company.insert(&txn).await?;
        }
        Role::ContentCreator => {
            let profile = input.creator.unwrap_or(creators::CreateCreatorProfile {
                bio: None,
                category: None,
                audience_size: None,
                pricing: None,
                location: None,
            });
            let new_creator = creators::ActiveModel {
                id: Set(Uuid::new_v4()),
                user_id: Set(user_id),
                bio: Set(profile.bio),
                category: Set(profile.category),
                audience_size: Set(profile.audience_size),
                pricing: Set(profile.pricing),
                location: Set(profile.location),
                created_at: Set(chrono::Utc::now()),
            };
            new_creator.insert(&txn).await?;
        }
    }

    txn.commit().await?;
    Ok(user)
}

/// Fetch all users.
pub async fn get_all_users(db: &DatabaseConnection) -> Result<Vec<users::Model>, DbErr> {
    users::Entity::find().all(db).await
}

/// Fetch a single user by ID.
pub async fn get_user_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find_by_id(id).one(db).await
}

/// Fetch a single user by email (login path).
pub async fn get_user_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(db)
        .await
}

/// Check whether an email or username is already taken.
pub async fn email_or_username_taken(
    db: &DatabaseConnection,
    email: &str,
    username: &str,
) -> Result<bool, DbErr> {
    let count = users::Entity::find()
        .filter(
            Condition::any()
                .add(users::Column::Email.eq(email))
                .add(users::Column::Username.eq(username)),
        )
        .count(db)
        .await?;
    Ok(count > 0)
}

/// Update a user's own profile fields.
pub async fn update_user(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateUser,
) -> Result<users::Model, DbErr> {
    let user = users::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("User not found".to_string()))?;

    let mut active: users::ActiveModel = user.into();

    if let Some(username) = input.username {
        active.username = Set(username);
    }
    if let Some(display_name) = input.display_name {
        active.display_name = Set(Some(display_name));
    }
    if let Some(avatar_url) = input.avatar_url {
        active.avatar_url = Set(Some(avatar_url));
    }
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Delete a user by ID (hard delete; FKs cascade).
pub async fn delete_user(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    users::Entity::delete_by_id(id).exec(db).await
}

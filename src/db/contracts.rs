use sea_orm::*;
use uuid::Uuid;

use crate::models::contracts::{
    self, CreateContract, Status, UpdateContract, UpdateContractStatus, generate_serial_number,
};
use crate::models::{criteria, sub_criteria};

/// Insert a new contract together with its criteria tree in one transaction.
/// The serial number is generated here; the unique column catches the
/// (astronomically unlikely) collision.
pub async fn insert_contract_with_criteria(
    db: &DatabaseConnection,
    company_id: Uuid,
    input: CreateContract,
) -> Result<contracts::Model, DbErr> {
    let txn = db.begin().await?;

    let contract_id = Uuid::new_v4();
    let new_contract = contracts::ActiveModel {
        id: Set(contract_id),
        company_id: Set(company_id),
        title: Set(input.title),
        description: Set(input.description),
        budget: Set(input.budget),
        start_date: Set(input.start_date),
        end_date: Set(input.end_date),
        status: Set(Status::Active),
        rank: Set(input.rank),
        serial_number: Set(generate_serial_number()),
        created_at: Set(chrono::Utc::now()),
    };
    let contract = new_contract.insert(&txn).await?;

    for crit in input.criteria {
        let criteria_id = Uuid::new_v4();
        let new_criteria = criteria::ActiveModel {
            id: Set(criteria_id),
            contract_id: Set(contract_id),
            name: Set(crit.name),
            description: Set(crit.description),
            created_at: Set(chrono::Utc::now()),
        };
        new_criteria.insert(&txn).await?;

        for sub in crit.sub_criteria {
            let new_sub = sub_criteria::ActiveModel {
                id: Set(Uuid::new_v4()),
                criteria_id: Set(criteria_id),
                name: Set(sub.name),
                description: Set(sub.description),
                created_at: Set(chrono::Utc::now()),
            };
            new_sub.insert(&txn).await?;
        }
    }

    txn.commit().await?;
    Ok(contract)
}

/// List active contracts, newest first, with keyset pagination on
/// (created_at, id).
pub async fn list_active_contracts(
    db: &DatabaseConnection,
    limit: u64,
    cursor_created_at: Option<chrono::DateTime<chrono::Utc>>,
    cursor_id: Option<Uuid>,
) -> Result<Vec<contracts::Model>, DbErr> {
    let mut query = contracts::Entity::find().filter(contracts::Column::Status.eq(Status::Active));

    if let (Some(cursor_created_at), Some(cursor_id)) = (cursor_created_at, cursor_id) {
        query = query.filter(
            Condition::any()
                .add(contracts::Column::CreatedAt.lt(cursor_created_at))
                .add(
                    Condition::all()
                        .add(contracts::Column::CreatedAt.eq(cursor_created_at))
                        .add(contracts::Column::Id.lt(cursor_id)),
                ),
        );
    }

    query
        .order_by_desc(contracts::Column::CreatedAt)
        .order_by_desc(contracts::Column::Id)
        .limit(limit)
        .all(db)
        .await
}

/// Fetch a single contract by ID.
pub async fn get_contract_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<contracts::Model>, DbErr> {
    contracts::Entity::find_by_id(id).one(db).await
}

/// Fetch a contract by its serial number (QR verification path).
pub async fn get_contract_by_serial(
    db: &DatabaseConnection,
    serial: &str,
) -> Result<Option<contracts::Model>, DbErr> {
    contracts::Entity::find()
        .filter(contracts::Column::SerialNumber.eq(serial))
        .one(db)
        .await
}

/// Fetch all contracts posted by a company.
pub async fn get_contracts_by_company_id(
    db: &DatabaseConnection,
    company_id: Uuid,
) -> Result<Vec<contracts::Model>, DbErr> {
    contracts::Entity::find()
        .filter(contracts::Column::CompanyId.eq(company_id))
        .order_by_desc(contracts::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch the criteria tree for a contract.
pub async fn get_criteria_for_contract(
    db: &DatabaseConnection,
    contract_id: Uuid,
) -> Result<Vec<criteria::CriteriaWithSubs>, DbErr> {
    let crits = criteria::Entity::find()
        .filter(criteria::Column::ContractId.eq(contract_id))
        .all(db)
        .await?;

    let mut out = Vec::with_capacity(crits.len());
    for crit in crits {
        let subs = sub_criteria::Entity::find()
            .filter(sub_criteria::Column::CriteriaId.eq(crit.id))
            .all(db)
            .await?;
        out.push(criteria::CriteriaWithSubs {
            criteria: crit,
            sub_criteria: subs,
        });
    }
    Ok(out)
}

/// Update an existing contract's editable fields.
pub async fn update_contract(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateContract,
) -> Result<contracts::Model, DbErr> {
    let contract = contracts::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Contract not found".to_string()))?;

    let mut active: contracts::ActiveModel = contract.into();

    if let Some(title) = input.title {
        active.title = Set(title);
    }
    if let Some(description) = input.description {
        active.description = Set(description);
    }
    if let Some(budget) = input.budget {
        active.budget = Set(budget);
    }
    if let Some(start_date) = input.start_date {
        active.start_date = Set(start_date);
    }
    if let Some(end_date) = input.end_date {
        active.end_date = Set(end_date);
    }
    if let Some(rank) = input.rank {
        active.rank = Set(rank);
    }

    active.update(db).await
}

/// Update the status of a contract.
pub async fn update_contract_status(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateContractStatus,
) -> Result<contracts::Model, DbErr> {
    let contract = contracts::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Contract not found".to_string()))?;

    let mut active: contracts::ActiveModel = contract.into();
    active.status = Set(input.status);

    active.update(db).await
}

/// Delete a contract by ID.
pub async fn delete_contract(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    contracts::Entity::delete_by_id(id).exec(db).await
}

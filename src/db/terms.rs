use sea_orm::*;
use uuid::Uuid;

use crate::models::term_confirmations;
use crate::models::terms::{
    self, CONFIRMATION_THRESHOLD, CreateTerm, Status, TermWithConfirmations, UpdateTerm,
};

/// Outcome of an idempotent confirm call.
#[derive(Debug, Clone)]
pub struct ConfirmOutcome {
    pub term: terms::Model,
    pub confirmations: u64,
    /// True only on the call that crossed the threshold.
    pub just_accepted: bool,
}

/// Insert a new term on a deal.
pub async fn insert_term(
    db: &DatabaseConnection,
    input: CreateTerm,
) -> Result<terms::Model, DbErr> {
    let new_term = terms::ActiveModel {
        id: Set(Uuid::new_v4()),
        deal_id: Set(input.deal_id),
        title: Set(input.title),
        description: Set(input.description),
        status: Set(Status::Negotiating),
        created_at: Set(chrono::Utc::now()),
    };

    new_term.insert(db).await
}

/// Fetch a single term by ID.
pub async fn get_term_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<terms::Model>, DbErr> {
    terms::Entity::find_by_id(id).one(db).await
}

/// Fetch all terms on a deal, each with its confirmation count.
pub async fn get_terms_by_deal_id(
    db: &DatabaseConnection,
    deal_id: Uuid,
) -> Result<Vec<TermWithConfirmations>, DbErr> {
    let term_rows = terms::Entity::find()
        .filter(terms::Column::DealId.eq(deal_id))
        .order_by_asc(terms::Column::CreatedAt)
        .all(db)
        .await?;

    let mut out = Vec::with_capacity(term_rows.len());
    for term in term_rows {
        let confirmations = count_confirmations(db, term.id).await?;
        out.push(TermWithConfirmations {
            term,
            confirmations,
        });
    }
    Ok(out)
}

/// Update a term's text while it is still negotiating.
pub async fn update_term(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateTerm,
) -> Result<terms::Model, DbErr> {
    let term = terms::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Term not found".to_string()))?;

    let mut active: terms::ActiveModel = term.into();

    if let Some(title) = input.title {
        active.title = Set(title);
    }
    if let Some(description) = input.description {
        active.description = Set(description);
    }

    active.update(db).await
}

/// Count distinct confirmers for a term.
pub async fn count_confirmations(db: &DatabaseConnection, term_id: Uuid) -> Result<u64, DbErr> {
    term_confirmations::Entity::find()
        .filter(term_confirmations::Column::TermId.eq(term_id))
        .count(db)
        .await
}

/// A term flips to Accepted on the call that reaches the distinct-confirmer
/// threshold; later confirms leave an already-accepted term untouched.
fn should_accept(confirmations: u64, status: &Status) -> bool {
    confirmations >= CONFIRMATION_THRESHOLD && *status != Status::Accepted
}

/// Record a confirmation for (term, user), idempotently, and flip the term
/// to Accepted once the distinct-confirmer threshold is reached.
///
/// The whole operation runs in one transaction: the ledger row, the count
/// and the status flip commit together, so the counter survives restarts
/// and a double-confirm from the same user is a no-op.
pub async fn confirm_term(
    db: &DatabaseConnection,
    term_id: Uuid,
    user_id: Uuid,
) -> Result<ConfirmOutcome, DbErr> {
    let txn = db.begin().await?;

    let term = terms::Entity::find_by_id(term_id)
        .one(&txn)
        .await?
        .ok_or(DbErr::RecordNotFound("Term not found".to_string()))?;

    let already = term_confirmations::Entity::find()
        .filter(term_confirmations::Column::TermId.eq(term_id))
        .filter(term_confirmations::Column::UserId.eq(user_id))
        .count(&txn)
        .await?
        > 0;

    if !already {
        let new_confirmation = term_confirmations::ActiveModel {
            id: Set(Uuid::new_v4()),
            term_id: Set(term_id),
            user_id: Set(user_id),
            created_at: Set(chrono::Utc::now()),
        };
        new_confirmation.insert(&txn).await?;
    }

    let confirmations = term_confirmations::Entity::find()
        .filter(term_confirmations::Column::TermId.eq(term_id))
        .count(&txn)
        .await?;

    let mut just_accepted = false;
    let term = if should_accept(confirmations, &term.status) {
        let mut active: terms::ActiveModel = term.into();
        active.status = Set(Status::Accepted);
        just_accepted = true;
        active.update(&txn).await?
    } else {
        term
    };

    txn.commit().await?;

    Ok(ConfirmOutcome {
        term,
        confirmations,
        just_accepted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terms_stay_negotiating_below_threshold() {
        assert!(!should_accept(CONFIRMATION_THRESHOLD - 1, &Status::Negotiating));
        assert!(!should_accept(0, &Status::Negotiating));
    }

    #[test]
    fn terms_accept_at_threshold() {
        assert!(should_accept(CONFIRMATION_THRESHOLD, &Status::Negotiating));
        assert!(should_accept(CONFIRMATION_THRESHOLD + 1, &Status::Negotiating));
    }

    #[test]
    fn accepted_terms_do_not_flip_again() {
        assert!(!should_accept(CONFIRMATION_THRESHOLD, &Status::Accepted));
    }
}

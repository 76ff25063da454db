pub mod companies;
pub mod contracts;
pub mod creators;
pub mod deals;
pub mod media;
pub mod messages;
pub mod notifications;
pub mod refresh_tokens;
pub mod rooms;
pub mod signatures;
pub mod terms;
pub mod users;

use sea_orm::{Database, DatabaseConnection, DbErr, SqlErr};
use std::env;

/// Create a SeaORM database connection pool from the `DATABASE_URL` env var.
pub async fn create_pool() -> DatabaseConnection {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    Database::connect(&database_url)
        .await
        .expect("Failed to connect to database")
}

/// Whether a database error is a unique-constraint violation. Handlers use
/// this to turn a racing duplicate insert into the same client error the
/// check-then-insert fast path reports.
pub fn is_unique_violation(e: &DbErr) -> bool {
    matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_sql_errors_are_not_unique_violations() {
        assert!(!is_unique_violation(&DbErr::Custom("boom".to_string())));
        assert!(!is_unique_violation(&DbErr::RecordNotFound(
            "missing".to_string()
        )));
    }
}

pub mod companies;
pub mod contracts;
pub mod creators;
pub mod criteria;
pub mod deals;
pub mod media;
pub mod messages;
pub mod notifications;
pub mod refresh_tokens;
pub mod room_participants;
pub mod rooms;
pub mod signatures;
pub mod sub_criteria;
pub mod term_confirmations;
pub mod terms;
pub mod users;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl PaginationQuery {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(20).min(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults_and_clamps() {
        let q = PaginationQuery {
            page: None,
            limit: None,
        };
        assert_eq!(q.page(), 1);
        assert_eq!(q.limit(), 20);

        let q = PaginationQuery {
            page: Some(0),
            limit: Some(5000),
        };
        assert_eq!(q.page(), 1);
        assert_eq!(q.limit(), 100);
    }
}

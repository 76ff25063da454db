use rand::Rng;
use rand::distributions::Alphanumeric;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Contract status stored as a lowercase string in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum Status {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "terminated")]
    Terminated,
}

/// Sponsorship tier of a contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum Rank {
    #[sea_orm(string_value = "plat")]
    Plat,
    #[sea_orm(string_value = "gold")]
    Gold,
    #[sea_orm(string_value = "silver")]
    Silver,
}

/// SeaORM entity for the `contracts` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contracts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub company_id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Double")]
    pub budget: f64,
    pub start_date: DateTimeUtc,
    pub end_date: DateTimeUtc,
    pub status: Status,
    pub rank: Rank,
    #[sea_orm(unique)]
    pub serial_number: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::companies::Entity",
        from = "Column::CompanyId",
        to = "super::companies::Column::Id"
    )]
    Company,
    #[sea_orm(has_many = "super::deals::Entity")]
    Deals,
    #[sea_orm(has_many = "super::criteria::Entity")]
    Criteria,
    #[sea_orm(has_many = "super::signatures::Entity")]
    Signatures,
}

impl Related<super::companies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Company.def()
    }
}

impl Related<super::deals::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Deals.def()
    }
}

impl Related<super::criteria::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Criteria.def()
    }
}

impl Related<super::signatures::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Signatures.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Generate a contract serial number: `SPF-<unix millis>-<6 alphanumeric>`.
///
/// The serial is what contract QR codes encode, so it must be unique and
/// stable for the lifetime of the contract (the column carries a unique
/// constraint as backstop).
pub fn generate_serial_number() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .collect();
    format!("SPF-{millis}-{suffix}")
}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct CreateContract {
    pub title: String,
    pub description: String,
    pub budget: f64,
    pub start_date: DateTimeUtc,
    pub end_date: DateTimeUtc,
    pub rank: Rank,
    #[serde(default)]
    pub criteria: Vec<super::criteria::CreateCriteria>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateContract {
    pub title: Option<String>,
    pub description: Option<String>,
    pub budget: Option<f64>,
    pub start_date: Option<DateTimeUtc>,
    pub end_date: Option<DateTimeUtc>,
    pub rank: Option<Rank>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateContractStatus {
    pub status: Status,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContractListQuery {
    pub limit: Option<u64>,
    pub cursor_created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub cursor_id: Option<Uuid>,
}

impl ContractListQuery {
    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(20).min(100)
    }

    /// First page with default limit — the only shape worth caching.
    pub fn is_first_page(&self) -> bool {
        self.limit.is_none() && self.cursor_created_at.is_none() && self.cursor_id.is_none()
    }
}

/// Public response for `GET /api/contracts/verify/{serial}` (QR lookup).
#[derive(Debug, Clone, Serialize)]
pub struct ContractVerification {
    pub serial_number: String,
    pub title: String,
    pub status: Status,
    pub rank: Rank,
    pub company_name: String,
    pub start_date: DateTimeUtc,
    pub end_date: DateTimeUtc,
    pub signature_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serial_number_matches_expected_shape() {
        let serial = generate_serial_number();
        let parts: Vec<&str> = serial.splitn(3, '-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "SPF");
        assert!(parts[1].parse::<i64>().is_ok(), "timestamp part: {serial}");
        assert_eq!(parts[2].len(), 6);
        assert!(parts[2].chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn serial_numbers_do_not_collide_cheaply() {
        let a = generate_serial_number();
        let b = generate_serial_number();
        assert_ne!(a, b);
    }

    #[test]
    fn first_page_detection() {
        let q = ContractListQuery {
            limit: None,
            cursor_created_at: None,
            cursor_id: None,
        };
        assert!(q.is_first_page());

        let q = ContractListQuery {
            limit: Some(10),
            cursor_created_at: None,
            cursor_id: None,
        };
        assert!(!q.is_first_page());
    }
}

//! HTTP handlers, grouped by resource.

pub mod assignments;
pub mod availability;
pub mod health;
pub mod ministries;
pub mod schedules;
pub mod substitutes;
pub mod volunteers;

use uuid::Uuid;

use servir_core::AppError;

/// Parses a path or payload id, mapping failure to a validation error.
fn parse_uuid(value: &str, what: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(value).map_err(|_| AppError::Validation(format!("invalid {what} id '{value}'")))
}

fn parse_date(value: &str) -> Result<chrono::NaiveDate, AppError> {
    value
        .parse()
        .map_err(|_| AppError::Validation(format!("invalid date '{value}', expected YYYY-MM-DD")))
}

#[cfg(test)]
mod tests {
    use super::{parse_date, parse_uuid};

    #[test]
    fn malformed_ids_become_validation_errors() {
        assert!(parse_uuid("not-a-uuid", "schedule").is_err());
        assert!(parse_uuid("4f9d2b1e-7c3a-4e5f-9b1d-2a3c4e5f6a7b", "schedule").is_ok());
    }

    #[test]
    fn dates_must_be_iso() {
        assert!(parse_date("03/08/2026").is_err());
        assert!(parse_date("2026-03-08").is_ok());
    }
}

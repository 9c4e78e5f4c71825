use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use super::DomainError;

/// Accepts RFC 3339 timestamps or bare `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_date_time(field: &'static str, raw: &str) -> Result<NaiveDateTime, DomainError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(DomainError::MissingField(field));
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.with_timezone(&Utc).naive_utc());
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| DomainError::InvalidDate(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::parse_date_time;
    use crate::domain::DomainError;

    #[test]
    fn parses_bare_date_as_midnight() {
        let parsed = parse_date_time("startDate", "2023-02-14").expect("date should parse");
        assert_eq!(parsed.to_string(), "2023-02-14 00:00:00");
    }

    #[test]
    fn parses_rfc3339_into_utc() {
        let parsed = parse_date_time("startDate", "2023-02-14T10:30:00-03:00")
            .expect("timestamp should parse");
        assert_eq!(parsed.to_string(), "2023-02-14 13:30:00");
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            parse_date_time("startDate", "14/02/2023"),
            Err(DomainError::InvalidDate(_))
        ));
        assert_eq!(
            parse_date_time("customerInfo.paymentDate", ""),
            Err(DomainError::MissingField("customerInfo.paymentDate"))
        );
    }
}

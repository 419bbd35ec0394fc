//! Optional timestamp parsing for request payloads.

use jiff::Timestamp;
use salvo::prelude::StatusError;

use crate::extensions::*;

pub(crate) trait TimestampExt {
    /// Parse an RFC 3339 timestamp if one was supplied.
    fn into_timestamp(self, field: &str) -> Result<Option<Timestamp>, StatusError>;
}

impl TimestampExt for Option<String> {
    fn into_timestamp(self, field: &str) -> Result<Option<Timestamp>, StatusError> {
        self.map(|value| value.parse::<Timestamp>())
            .transpose()
            .or_400(&format!("{field} is not a valid timestamp"))
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn missing_value_is_none() -> TestResult {
        assert_eq!(None::<String>.into_timestamp("order_date")?, None);

        Ok(())
    }

    #[test]
    fn parses_rfc3339() -> TestResult {
        let parsed = Some("2026-02-21T12:00:00Z".to_string()).into_timestamp("order_date")?;

        assert_eq!(parsed, Some("2026-02-21T12:00:00Z".parse()?));

        Ok(())
    }

    #[test]
    fn rejects_garbage_with_field_name() {
        let error = Some("yesterday".to_string()).into_timestamp("order_date").err();

        assert_eq!(
            error.map(|e| e.brief),
            Some("order_date is not a valid timestamp".to_string())
        );
    }
}

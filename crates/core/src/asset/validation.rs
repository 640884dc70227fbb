//! Input validation performed before any store is touched.

use std::time::Duration;

use asset_shared::AssetId;

use super::error::AssetError;
use super::types::AssetStatus;

/// Check the status declared in a completion request.
///
/// Only the literal `uploaded` is accepted; absent or any other value is an
/// invalid request.
pub fn validate_declared_status(declared: Option<&str>) -> Result<(), AssetError> {
    match declared.and_then(AssetStatus::parse) {
        Some(AssetStatus::Uploaded) => Ok(()),
        _ => Err(AssetError::InvalidRequest),
    }
}

/// Resolve the download URL lifetime from the `timeout` query value.
///
/// `None` selects `default`. A supplied value must be a strictly positive
/// integer number of seconds: decimal digits with at most one leading `+`.
pub fn parse_timeout(raw: Option<&str>, default: Duration) -> Result<Duration, AssetError> {
    let Some(raw) = raw else {
        return Ok(default);
    };

    let digits = raw.strip_prefix('+').unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AssetError::InvalidTimeout);
    }

    match digits.parse::<u32>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(u64::from(secs))),
        _ => Err(AssetError::InvalidTimeout),
    }
}

/// Parse a path identifier.
///
/// A value that is not a UUID cannot name any asset, so it is reported as
/// not found.
pub fn parse_asset_id(raw: &str) -> Result<AssetId, AssetError> {
    raw.parse::<AssetId>()
        .map_err(|_| AssetError::not_found(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    const DEFAULT: Duration = Duration::from_secs(60);

    #[rstest]
    #[case(Some("uploaded"), true)]
    #[case(Some("created"), false)]
    #[case(Some("UPLOADED"), false)]
    #[case(Some("something other than uploaded"), false)]
    #[case(Some(""), false)]
    #[case(None, false)]
    fn test_validate_declared_status(#[case] declared: Option<&str>, #[case] ok: bool) {
        let result = validate_declared_status(declared);
        if ok {
            assert!(result.is_ok());
        } else {
            assert!(matches!(result, Err(AssetError::InvalidRequest)));
        }
    }

    #[rstest]
    #[case("abc")]
    #[case("not a number")]
    #[case("0")]
    #[case("-1")]
    #[case("+")]
    #[case("++5")]
    #[case("+-5")]
    #[case("+0")]
    #[case("1.5")]
    #[case(" 5")]
    #[case("")]
    #[case("99999999999")]
    fn test_parse_timeout_rejects(#[case] raw: &str) {
        assert!(matches!(
            parse_timeout(Some(raw), DEFAULT),
            Err(AssetError::InvalidTimeout)
        ));
    }

    #[test]
    fn test_parse_timeout_default_and_explicit() {
        assert_eq!(parse_timeout(None, DEFAULT).unwrap(), DEFAULT);
        assert_eq!(
            parse_timeout(Some("300"), DEFAULT).unwrap(),
            Duration::from_secs(300)
        );
        assert_eq!(
            parse_timeout(Some("1"), DEFAULT).unwrap(),
            Duration::from_secs(1)
        );
    }

    #[rstest]
    #[case("+5", 5)]
    #[case("0005", 5)]
    #[case("+0005", 5)]
    #[case("+4294967295", 4_294_967_295)]
    fn test_parse_timeout_signs_and_leading_zeros(#[case] raw: &str, #[case] secs: u64) {
        assert_eq!(
            parse_timeout(Some(raw), DEFAULT).unwrap(),
            Duration::from_secs(secs)
        );
    }

    #[test]
    fn test_parse_asset_id() {
        let id = AssetId::new();
        assert_eq!(parse_asset_id(&id.to_string()).unwrap(), id);

        let err = parse_asset_id("1").unwrap_err();
        assert_eq!(err.to_string(), "Asset 1 not found");
    }

    proptest! {
        #[test]
        fn prop_positive_timeouts_accepted(secs in 1u32..=u32::MAX) {
            let ttl = parse_timeout(Some(&secs.to_string()), DEFAULT);
            prop_assert_eq!(ttl.ok(), Some(Duration::from_secs(u64::from(secs))));
        }

        #[test]
        fn prop_non_positive_timeouts_rejected(secs in i64::MIN..=0i64) {
            let result = parse_timeout(Some(&secs.to_string()), DEFAULT);
            prop_assert!(matches!(result, Err(AssetError::InvalidTimeout)));
        }

        #[test]
        fn prop_non_numeric_timeouts_rejected(raw in "[a-zA-Z .]{1,12}") {
            let result = parse_timeout(Some(&raw), DEFAULT);
            prop_assert!(matches!(result, Err(AssetError::InvalidTimeout)));
        }
    }
}

//! Special-type hooks
//!
//! Some application types get custom treatment layered over the generic
//! kind dispatch. The only one here is the timestamp: it has no wire kind of
//! its own, so it travels as a string and is only recognized again when the
//! destination is declared as a timestamp.
//!
//! ## Timestamp text form
//!
//! RFC 3339 in UTC with exactly nine fractional digits:
//! `2024-01-02T03:04:05.000000006Z`. Decoding accepts any strict RFC 3339
//! text and normalizes it to UTC.
//!
//! Years past 9999 format with a sign and five digits
//! (`+10000-01-01T00:00:00.000000000Z`), which RFC 3339 parsing rejects.
//! Such timestamps encode but do not decode back.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::document::{DocValue, FieldType};
use crate::driver::DecodeDriver;
use crate::error::{CodecError, Result};
use crate::observer::ValueObserver;

/// Strategy consulted around generic dispatch.
pub trait SpecialCodec: Send + Sync {
    /// Called before generic dispatch on encode.
    ///
    /// Return `Ok(true)` after emitting exactly one primitive notification
    /// on `obs`, or `Ok(false)` to let generic dispatch proceed.
    fn encode_special(&self, value: &DocValue, obs: &mut dyn ValueObserver) -> Result<bool>;

    /// Called with the destination's declared type before generic decode.
    ///
    /// Return `Ok(Some(_))` to supply the decoded value, or `Ok(None)` to
    /// decline.
    fn decode_special(
        &self,
        expected: &FieldType,
        driver: &dyn DecodeDriver,
    ) -> Result<Option<DocValue>>;
}

/// Declines every value.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSpecials;

impl SpecialCodec for NoSpecials {
    fn encode_special(&self, _value: &DocValue, _obs: &mut dyn ValueObserver) -> Result<bool> {
        Ok(false)
    }

    fn decode_special(
        &self,
        _expected: &FieldType,
        _driver: &dyn DecodeDriver,
    ) -> Result<Option<DocValue>> {
        Ok(None)
    }
}

/// Encodes timestamps as RFC 3339 text and recovers them for timestamp
/// destinations.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampCodec;

impl SpecialCodec for TimestampCodec {
    fn encode_special(&self, value: &DocValue, obs: &mut dyn ValueObserver) -> Result<bool> {
        match value {
            DocValue::Timestamp(ts) => {
                obs.encode_string(&format_timestamp(ts));
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn decode_special(
        &self,
        expected: &FieldType,
        driver: &dyn DecodeDriver,
    ) -> Result<Option<DocValue>> {
        if *expected != FieldType::Timestamp {
            return Ok(None);
        }
        match driver.as_string() {
            Ok(text) => parse_timestamp(text).map(|ts| Some(DocValue::Timestamp(ts))),
            Err(_) => Err(CodecError::mismatch(
                "string field for timestamp",
                driver.kind().name(),
            )),
        }
    }
}

/// Format a timestamp in the fixed nanosecond RFC 3339 form.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Parse strict RFC 3339 text into a UTC timestamp.
pub fn parse_timestamp(text: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| CodecError::InvalidTimestamp {
            text: text.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::TreeBuilder;
    use crate::value::Value;
    use chrono::TimeZone;

    fn sample() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap() + chrono::Duration::nanoseconds(6)
    }

    #[test]
    fn test_format_has_nine_fraction_digits() {
        assert_eq!(format_timestamp(&sample()), "2024-01-02T03:04:05.000000006Z");
        let whole = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(format_timestamp(&whole), "2024-01-02T03:04:05.000000000Z");
    }

    #[test]
    fn test_parse_round_trip() {
        let ts = sample();
        assert_eq!(parse_timestamp(&format_timestamp(&ts)).unwrap(), ts);
    }

    #[test]
    fn test_parse_normalizes_offset() {
        let parsed = parse_timestamp("2024-01-02T05:04:05+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap());
    }

    #[test]
    fn test_year_past_9999_does_not_decode() {
        let far = Utc.with_ymd_and_hms(10000, 1, 1, 0, 0, 0).unwrap();
        let text = format_timestamp(&far);
        assert_eq!(text, "+10000-01-01T00:00:00.000000000Z");

        let node = Value::from(text.as_str());
        let err = TimestampCodec
            .decode_special(&FieldType::Timestamp, &node)
            .unwrap_err();
        assert!(matches!(err, CodecError::InvalidTimestamp { ref text, .. } if text.starts_with('+')));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse_timestamp("yesterday").unwrap_err();
        assert!(matches!(err, CodecError::InvalidTimestamp { ref text, .. } if text == "yesterday"));
    }

    #[test]
    fn test_encode_special_only_takes_timestamps() {
        let mut builder = TreeBuilder::new();
        assert!(!TimestampCodec
            .encode_special(&DocValue::Int(1), &mut builder)
            .unwrap());
        assert!(!builder.is_encoded());

        assert!(TimestampCodec
            .encode_special(&DocValue::Timestamp(sample()), &mut builder)
            .unwrap());
        assert_eq!(
            builder.finish().unwrap(),
            Value::String("2024-01-02T03:04:05.000000006Z".to_string())
        );
    }

    #[test]
    fn test_decode_special_keyed_by_destination() {
        let node = Value::from("2024-01-02T03:04:05.000000006Z");
        assert_eq!(
            TimestampCodec
                .decode_special(&FieldType::String, &node)
                .unwrap(),
            None
        );
        assert_eq!(
            TimestampCodec
                .decode_special(&FieldType::Timestamp, &node)
                .unwrap(),
            Some(DocValue::Timestamp(sample()))
        );
    }

    #[test]
    fn test_decode_special_rejects_null_and_numbers() {
        let err = TimestampCodec
            .decode_special(&FieldType::Timestamp, &Value::Null)
            .unwrap_err();
        assert_eq!(err, CodecError::mismatch("string field for timestamp", "null"));

        let err = TimestampCodec
            .decode_special(&FieldType::Timestamp, &Value::Int(5))
            .unwrap_err();
        assert_eq!(err, CodecError::mismatch("string field for timestamp", "int64"));
    }

    #[test]
    fn test_no_specials_declines() {
        let mut builder = TreeBuilder::new();
        let ts = DocValue::Timestamp(sample());
        assert!(!NoSpecials.encode_special(&ts, &mut builder).unwrap());
        assert_eq!(
            NoSpecials
                .decode_special(&FieldType::Timestamp, &Value::Null)
                .unwrap(),
            None
        );
    }
}

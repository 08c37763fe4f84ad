use crate::error::{DicomcheckError, Result};
use crate::extraction::reader::{read, to_string};
use crate::extraction::source::{AttributeKey, MetadataSource};
use chrono::{NaiveDate, NaiveTime};

/// Parses a DICOM DA value (`YYYYMMDD`)
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y%m%d")
        .map_err(|e| DicomcheckError::parse_failure("date", format!("'{}': {}", s, e)))
}

/// Parses a DICOM TM value (`HHMMSS` or `HHMMSS.ffffff`)
pub fn parse_time(s: &str) -> Result<NaiveTime> {
    let s = s.trim();
    let format = if s.contains('.') { "%H%M%S%.f" } else { "%H%M%S" };
    NaiveTime::parse_from_str(s, format)
        .map_err(|e| DicomcheckError::parse_failure("time", format!("'{}': {}", s, e)))
}

/// Reads a required date attribute
pub(crate) fn read_date<S: MetadataSource + ?Sized>(
    source: &S,
    key: AttributeKey<'_>,
) -> Result<NaiveDate> {
    let raw = require(source, key)?;
    parse_date(&raw).map_err(|e| DicomcheckError::parse_failure(key.to_string(), e.to_string()))
}

/// Reads a required time attribute
pub(crate) fn read_time<S: MetadataSource + ?Sized>(
    source: &S,
    key: AttributeKey<'_>,
) -> Result<NaiveTime> {
    let raw = require(source, key)?;
    parse_time(&raw).map_err(|e| DicomcheckError::parse_failure(key.to_string(), e.to_string()))
}

/// Reads a required string attribute
pub(crate) fn require<S: MetadataSource + ?Sized>(
    source: &S,
    key: AttributeKey<'_>,
) -> Result<String> {
    read(source, key, to_string)
        .ok_or_else(|| DicomcheckError::parse_failure(key.to_string(), "attribute absent"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::sidecar::SidecarRecord;
    use crate::extraction::tags::STUDY_DATE;
    use chrono::Timelike;
    use rstest::rstest;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("20190321").unwrap(),
            NaiveDate::from_ymd_opt(2019, 3, 21).unwrap()
        );
        assert!(parse_date("2019-03-21").is_err());
        assert!(parse_date("20191341").is_err());
        assert!(parse_date("").is_err());
    }

    #[rstest]
    #[case("142530", 14, 25, 30, 0)]
    #[case("142530.125000", 14, 25, 30, 125_000_000)]
    #[case("142530.5", 14, 25, 30, 500_000_000)]
    fn test_parse_time(
        #[case] input: &str,
        #[case] h: u32,
        #[case] m: u32,
        #[case] s: u32,
        #[case] nanos: u32,
    ) {
        let t = parse_time(input).unwrap();
        assert_eq!((t.hour(), t.minute(), t.second(), t.nanosecond()), (h, m, s, nanos));
    }

    #[test]
    fn test_parse_time_invalid() {
        assert!(parse_time("25:00:00").is_err());
        assert!(parse_time("").is_err());
    }

    #[test]
    fn test_read_date_absent_is_parse_failure() {
        let err = read_date(&SidecarRecord::new(), STUDY_DATE.into()).unwrap_err();
        assert!(matches!(err, DicomcheckError::ParseFailure { .. }));
    }
}

// Copyright 2023 Contributors to the dhcverify project.
// SPDX-License-Identifier: Apache-2.0

use super::dose::Dose;
use super::errors::Error;
use crate::vaccine::{Coding, VaccineMetadata};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use std::fmt;

const DATE_FORMAT: &str = "%Y-%m-%d";
const LOCAL_DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Decides whether the spacing between doses is acceptable for a product.
/// `occurrences` holds the parsed administration times of the doses that had
/// one, sorted oldest first.
pub trait DoseSpacingPolicy: fmt::Debug + Send + Sync {
    fn is_satisfied(&self, vmd: &VaccineMetadata, occurrences: &[DateTime<Utc>]) -> bool;
}

/// Placeholder spacing policy: every course passes.
///
/// STUB: the days-between-doses window in [`VaccineMetadata`] is not checked
/// yet.  Swap in a real policy with `Processor::with_spacing_policy`.
#[derive(Debug, Default, Clone, Copy)]
pub struct UncheckedSpacing;

impl DoseSpacingPolicy for UncheckedSpacing {
    fn is_satisfied(&self, _vmd: &VaccineMetadata, _occurrences: &[DateTime<Utc>]) -> bool {
        true
    }
}

/// Parse a dose occurrence given as a calendar date (`YYYY-MM-DD`, taken as
/// midnight UTC), an RFC 3339 timestamp, or an ISO 8601 date-time without a
/// UTC offset (`YYYY-MM-DDThh:mm:ss[.fff]`, taken as UTC).
pub fn parse_occurrence(s: &str) -> Result<DateTime<Utc>, Error> {
    if let Ok(d) = NaiveDate::parse_from_str(s, DATE_FORMAT) {
        return Ok(d.and_time(NaiveTime::MIN).and_utc());
    }

    match DateTime::parse_from_rfc3339(s) {
        Ok(t) => Ok(t.with_timezone(&Utc)),
        Err(e) => NaiveDateTime::parse_from_str(s, LOCAL_DATE_TIME_FORMAT)
            .map(|t| t.and_utc())
            .map_err(|_| Error::OccurrenceFormat(format!("{s:?}: {e}"))),
    }
}

/// Returns the coding shared by all doses, failing if they reference more
/// than one product.  `doses` must not be empty.
pub(crate) fn shared_coding(doses: &[Dose]) -> Result<&Coding, Error> {
    let first = &doses[0].coding;

    if let Some(other) = doses.iter().map(|d| &d.coding).find(|c| *c != first) {
        return Err(Error::MixedVaccineIdentity(format!(
            "doses reference both {first} and {other}"
        )));
    }

    Ok(first)
}

/// Parse the occurrence of every dose that has one, oldest first.  Doses
/// without an occurrence are skipped; a malformed occurrence is an error.
pub(crate) fn occurrences(doses: &[Dose]) -> Result<Vec<DateTime<Utc>>, Error> {
    let mut v = doses
        .iter()
        .filter_map(Dose::occurrence)
        .map(parse_occurrence)
        .collect::<Result<Vec<_>, _>>()?;

    v.sort();

    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vaccine::CVX_SYSTEM;
    use chrono::TimeZone;

    fn moderna(occurrence: &str) -> Dose {
        Dose::new(Coding::new(CVX_SYSTEM, "207"), occurrence)
    }

    #[test]
    fn parse_calendar_date() {
        assert_eq!(
            parse_occurrence("2021-03-16").unwrap(),
            Utc.with_ymd_and_hms(2021, 3, 16, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn parse_timestamp_normalises_to_utc() {
        assert_eq!(
            parse_occurrence("2021-04-06T10:30:00+02:00").unwrap(),
            Utc.with_ymd_and_hms(2021, 4, 6, 8, 30, 0).unwrap()
        );
        assert_eq!(
            parse_occurrence("2021-04-06T10:30:00.250Z").unwrap(),
            Utc.with_ymd_and_hms(2021, 4, 6, 10, 30, 0).unwrap()
                + chrono::Duration::milliseconds(250)
        );
    }

    #[test]
    fn parse_timestamp_without_offset_is_utc() {
        assert_eq!(
            parse_occurrence("2021-04-06T10:30:00").unwrap(),
            Utc.with_ymd_and_hms(2021, 4, 6, 10, 30, 0).unwrap()
        );
        assert_eq!(
            parse_occurrence("2021-04-06T10:30:00.5").unwrap(),
            Utc.with_ymd_and_hms(2021, 4, 6, 10, 30, 0).unwrap()
                + chrono::Duration::milliseconds(500)
        );
    }

    #[test]
    fn parse_rejects_other_formats() {
        for s in [
            "16/03/2021",
            "March 2021",
            "2021-13-01",
            "2021-03-16 10:30",
            "2021-04-06T10:30",
            "2021-04-06T25:00:00",
            "",
        ] {
            assert!(
                matches!(parse_occurrence(s), Err(Error::OccurrenceFormat(_))),
                "{s:?} should not parse"
            );
        }
    }

    #[test]
    fn shared_coding_ok() {
        let doses = vec![moderna("2021-03-16"), moderna("2021-04-06")];

        assert_eq!(
            shared_coding(&doses).unwrap(),
            &Coding::new(CVX_SYSTEM, "207")
        );
    }

    #[test]
    fn shared_coding_mixed() {
        let doses = vec![
            moderna("2021-03-16"),
            Dose::new(Coding::new(CVX_SYSTEM, "208"), "2021-04-06"),
        ];

        assert!(matches!(
            shared_coding(&doses),
            Err(Error::MixedVaccineIdentity(_))
        ));
    }

    #[test]
    fn shared_coding_same_code_other_system() {
        let doses = vec![
            moderna("2021-03-16"),
            Dose::new(Coding::new("urn:other", "207"), "2021-04-06"),
        ];

        assert!(shared_coding(&doses).is_err());
    }

    #[test]
    fn occurrences_sorted_and_skip_missing() {
        let doses = vec![
            moderna("2021-04-06"),
            Dose {
                coding: Coding::new(CVX_SYSTEM, "207"),
                ..Default::default()
            },
            moderna("2021-03-16"),
        ];

        let v = occurrences(&doses).unwrap();

        assert_eq!(
            v,
            vec![
                Utc.with_ymd_and_hms(2021, 3, 16, 0, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2021, 4, 6, 0, 0, 0).unwrap(),
            ]
        );
    }

    #[test]
    fn occurrences_bad_format_aborts() {
        let doses = vec![moderna("2021-03-16"), moderna("yesterday")];

        assert!(occurrences(&doses).is_err());
    }
}

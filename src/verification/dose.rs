// Copyright 2023 Contributors to the dhcverify project.
// SPDX-License-Identifier: Apache-2.0

use crate::vaccine::Coding;
use serde::{Deserialize, Serialize};

/// FHIR Immunization status, see
/// http://hl7.org/fhir/R4/immunization-definitions.html#Immunization.status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DoseStatus {
    Completed,
    EnteredInError,
    NotDone,
}

/// A single administered dose.  This is deliberately much simpler than a FHIR
/// Immunization resource so that it can be populated from any credential
/// format.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dose {
    /// The vaccine product
    pub coding: Coding,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DoseStatus>,

    /// Date (`YYYY-MM-DD`) or timestamp of administration, see
    /// http://hl7.org/fhir/r4/immunization-definitions.html#Immunization.occurrence_x_
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occurrence_date_time: Option<String>,

    /// Occurrence supplied as a string rather than a dateTime
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occurrence_string: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lot_number: Option<String>,

    /// Where the dose was administered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
}

impl Dose {
    /// A completed dose of `coding` given on `occurrence`
    pub fn new(coding: Coding, occurrence: &str) -> Self {
        Self {
            coding,
            status: Some(DoseStatus::Completed),
            occurrence_date_time: Some(occurrence.to_string()),
            ..Default::default()
        }
    }

    /// The occurrence value to use for this dose, if any: the dateTime form
    /// wins over the string form, and empty strings are ignored.
    pub fn occurrence(&self) -> Option<&str> {
        [&self.occurrence_date_time, &self.occurrence_string]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vaccine::CVX_SYSTEM;

    const TEST_DOSES_MODERNA: &str = include_str!("../../testdata/doses-moderna.json");

    #[test]
    fn decode_fhir_names() {
        let doses: Vec<Dose> = serde_json::from_str(TEST_DOSES_MODERNA).unwrap();

        assert_eq!(doses.len(), 2);

        let d0 = &doses[0];
        assert_eq!(d0.coding, Coding::new(CVX_SYSTEM, "207"));
        assert_eq!(d0.status, Some(DoseStatus::Completed));
        assert_eq!(d0.occurrence(), Some("2021-03-16"));
        assert_eq!(d0.lot_number.as_deref(), Some("0000001"));

        assert_eq!(doses[1].occurrence(), Some("2021-04-06T10:30:00Z"));
    }

    #[test]
    fn occurrence_precedence() {
        let mut d = Dose {
            coding: Coding::new(CVX_SYSTEM, "207"),
            occurrence_string: Some("2021-01-01".to_string()),
            ..Default::default()
        };
        assert_eq!(d.occurrence(), Some("2021-01-01"));

        d.occurrence_date_time = Some("".to_string());
        assert_eq!(d.occurrence(), Some("2021-01-01"));

        d.occurrence_date_time = Some("2021-02-02".to_string());
        assert_eq!(d.occurrence(), Some("2021-02-02"));

        d.occurrence_date_time = None;
        d.occurrence_string = None;
        assert_eq!(d.occurrence(), None);
    }

    #[test]
    fn status_codes() {
        assert_eq!(
            serde_json::from_str::<DoseStatus>(r#""entered-in-error""#).unwrap(),
            DoseStatus::EnteredInError
        );
        assert_eq!(
            serde_json::to_string(&DoseStatus::NotDone).unwrap(),
            r#""not-done""#
        );
    }
}

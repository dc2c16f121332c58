// Copyright 2023 Contributors to the dhcverify project.
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt;

/// The CDC vaccine administered (CVX) code system
pub const CVX_SYSTEM: &str = "http://hl7.org/fhir/sid/cvx";

/// A FHIR R4 Coding, i.e., a code defined by a terminology system.  See
/// http://hl7.org/fhir/R4/datatypes.html#Coding
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coding {
    /// Identity of the terminology system
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub system: String,

    /// Symbol in syntax defined by the system
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub code: String,
}

impl Coding {
    pub fn new(system: &str, code: &str) -> Self {
        Self {
            system: system.to_string(),
            code: code.to_string(),
        }
    }

    /// Canonical textual key of the coding, `{system}#{code}`.  Catalog
    /// identifiers use this format; lookups by coding compare the two
    /// fields directly and never split the key.
    pub fn key(&self) -> String {
        catalog_key(&self.system, &self.code)
    }
}

impl fmt::Display for Coding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.system, self.code)
    }
}

fn catalog_key(system: &str, code: &str) -> String {
    format!("{system}#{code}")
}

/// The CVX status of a product, as published in the CDC table
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CvxStatus {
    /// Active in the US
    #[serde(rename = "Active")]
    Active,

    /// Active outside of the US
    #[serde(rename = "Non-US")]
    NonUs,
}

/// Acceptable range of days between two consecutive doses
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoseInterval {
    pub begin: u32,
    pub end: u32,
}

/// Reference data about a vaccine product.  A product may be identified by
/// more than one equivalent coding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaccineMetadata {
    /// Catalog identifier, the key of the first coding
    pub id: String,

    /// Equivalent codings for the product
    pub codings: Vec<Coding>,

    /// Regional trust status
    #[serde(rename = "cvx_status")]
    pub status: CvxStatus,

    /// Number of doses required to complete the course
    pub doses: u32,

    /// Days that must elapse after the last dose before it is considered
    /// protective
    pub days_since_last_dose: u32,

    /// Acceptable spacing between doses, when published
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_between_doses: Option<DoseInterval>,

    pub sale_proprietary_name: String,

    /// Short name used for display
    pub manufacturer_name: String,
}

impl VaccineMetadata {
    /// Create a new metadata record; `id` is derived from the first coding.
    pub fn new(
        codings: Vec<Coding>,
        status: CvxStatus,
        doses: u32,
        days_since_last_dose: u32,
    ) -> Self {
        let id = codings.first().map(Coding::key).unwrap_or_default();

        Self {
            id,
            codings,
            status,
            doses,
            days_since_last_dose,
            days_between_doses: None,
            sale_proprietary_name: String::new(),
            manufacturer_name: String::new(),
        }
    }

    pub fn with_days_between_doses(mut self, begin: u32, end: u32) -> Self {
        self.days_between_doses = Some(DoseInterval { begin, end });
        self
    }

    pub fn with_names(mut self, sale_proprietary_name: &str, manufacturer_name: &str) -> Self {
        self.sale_proprietary_name = sale_proprietary_name.to_string();
        self.manufacturer_name = manufacturer_name.to_string();
        self
    }

    /// True if `coding` is one of the codings identifying this product
    pub fn is_coded_as(&self, coding: &Coding) -> bool {
        self.codings.iter().any(|c| c == coding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coding_key_format() {
        let c = Coding::new(CVX_SYSTEM, "207");

        assert_eq!(c.key(), "http://hl7.org/fhir/sid/cvx#207");
        assert_eq!(c.to_string(), c.key());
    }

    #[test]
    fn coding_equality_needs_both_fields() {
        let a = Coding::new(CVX_SYSTEM, "207");

        assert_eq!(a, Coding::new(CVX_SYSTEM, "207"));
        assert_ne!(a, Coding::new(CVX_SYSTEM, "208"));
        assert_ne!(a, Coding::new("bogus", "207"));
    }

    #[test]
    fn metadata_id_is_first_coding_key() {
        let md = VaccineMetadata::new(
            vec![Coding::new(CVX_SYSTEM, "207"), Coding::new("urn:other", "m1")],
            CvxStatus::Active,
            2,
            14,
        );

        assert_eq!(md.id, "http://hl7.org/fhir/sid/cvx#207");
        assert!(md.is_coded_as(&Coding::new("urn:other", "m1")));
        assert!(!md.is_coded_as(&Coding::new("urn:other", "m2")));
    }

    #[test]
    fn cvx_status_json_names() {
        assert_eq!(
            serde_json::to_string(&CvxStatus::NonUs).unwrap(),
            r#""Non-US""#
        );
        assert_eq!(
            serde_json::from_str::<CvxStatus>(r#""Active""#).unwrap(),
            CvxStatus::Active
        );
    }
}

// Copyright 2023 Contributors to the dhcverify project.
// SPDX-License-Identifier: Apache-2.0

use super::data::covid_vaccines;
use super::errors::Error;
use super::metadata::{Coding, VaccineMetadata};
use super::region::{ActiveStatusPolicy, Region, TrustPolicy};
use super::IVaccineCatalog;
use std::collections::HashMap;

/// In-memory vaccine catalog.  Entries are indexed by each of their codings
/// and by their identifier.  Once built the catalog is never mutated, so a
/// single instance can be shared by any number of concurrent verifications.
#[derive(Debug)]
pub struct MemoVaccineCatalog {
    entries: Vec<VaccineMetadata>,
    by_coding: HashMap<Coding, usize>,
    by_id: HashMap<String, usize>,
    policies: HashMap<Region, Box<dyn TrustPolicy>>,
}

impl Default for MemoVaccineCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoVaccineCatalog {
    /// Returns a catalog loaded with the built-in COVID-19 vaccine table and
    /// the default region policies
    pub fn new() -> Self {
        Self::from_entries(covid_vaccines())
    }

    /// Returns a catalog holding the given entries, in the given order, and
    /// the default region policies.
    ///
    /// Keys are expected to be unique across `entries`.  If they are not, the
    /// index points at the last entry carrying the key.
    pub fn from_entries(entries: Vec<VaccineMetadata>) -> Self {
        let mut by_coding = HashMap::new();
        let mut by_id = HashMap::new();

        for (i, vmd) in entries.iter().enumerate() {
            for c in vmd.codings.iter() {
                by_coding.insert(c.clone(), i);
            }
            by_id.insert(vmd.id.clone(), i);
        }

        let mut policies: HashMap<Region, Box<dyn TrustPolicy>> = HashMap::new();
        policies.insert(Region::Usa, Box::new(ActiveStatusPolicy));

        Self {
            entries,
            by_coding,
            by_id,
            policies,
        }
    }

    /// Register (or replace) the trust policy for `region`
    pub fn with_policy(mut self, region: Region, policy: impl TrustPolicy + 'static) -> Self {
        self.policies.insert(region, Box::new(policy));
        self
    }
}

impl IVaccineCatalog for MemoVaccineCatalog {
    fn lookup(&self, system: &str, code: &str) -> Option<&VaccineMetadata> {
        self.by_coding
            .get(&Coding::new(system, code))
            .map(|i| &self.entries[*i])
    }

    fn lookup_by_id(&self, id: &str) -> Option<&VaccineMetadata> {
        self.by_id.get(id).map(|i| &self.entries[*i])
    }

    fn all(&self) -> Vec<&VaccineMetadata> {
        self.entries.iter().collect()
    }

    fn policy(&self, region: Region) -> Result<&dyn TrustPolicy, Error> {
        self.policies
            .get(&region)
            .map(|p| p.as_ref())
            .ok_or_else(|| Error::RegionNotSupported(region.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vaccine::{CvxStatus, CVX_SYSTEM};

    #[test]
    fn lookup_known_code() {
        let s = MemoVaccineCatalog::new();

        let vmd = s.lookup(CVX_SYSTEM, "208");
        assert!(vmd.is_some());

        let res = vmd.unwrap();
        assert_eq!(res.manufacturer_name, "Pfizer, Inc");
        assert_eq!(res.doses, 2);

        let by_id = s.lookup_by_id(&res.id);
        assert_eq!(by_id, Some(res));
    }

    #[test]
    fn lookup_unknown_code() {
        let s = MemoVaccineCatalog::new();

        assert!(s.lookup("bogus", "208").is_none());
        assert!(s.lookup(CVX_SYSTEM, "999").is_none());
        assert!(s.lookup_by_id("bogus#208").is_none());
    }

    #[test]
    fn every_entry_round_trips() {
        let s = MemoVaccineCatalog::new();

        for vmd in s.all() {
            for c in vmd.codings.iter() {
                assert_eq!(s.lookup(&c.system, &c.code), Some(vmd));
            }
            assert_eq!(s.lookup_by_id(&vmd.id), Some(vmd));
        }
    }

    #[test]
    fn all_keeps_catalog_order() {
        let s = MemoVaccineCatalog::new();

        let codes: Vec<&str> = s
            .all()
            .iter()
            .map(|vmd| vmd.codings[0].code.as_str())
            .collect();

        assert_eq!(codes, vec!["207", "208", "210", "212"]);
    }

    #[test]
    fn trusted_for_usa() {
        let s = MemoVaccineCatalog::new();

        let trusted = s.trusted_for_region(Region::Usa).unwrap();

        assert_eq!(trusted.len(), 3);
        assert!(trusted.iter().all(|vmd| vmd.status == CvxStatus::Active));
    }

    #[test]
    fn trusted_for_unsupported_region() {
        let s = MemoVaccineCatalog::new();

        assert_eq!(
            s.trusted_for_region(Region::Eu),
            Err(Error::RegionNotSupported("eu".to_string()))
        );
    }

    #[test]
    fn registered_policy_is_used() {
        #[derive(Debug)]
        struct TrustEverything;

        impl TrustPolicy for TrustEverything {
            fn is_trusted(&self, _: &VaccineMetadata) -> bool {
                true
            }
        }

        let s = MemoVaccineCatalog::new().with_policy(Region::Eu, TrustEverything);

        assert_eq!(s.trusted_for_region(Region::Eu).unwrap().len(), 4);
    }

    #[test]
    fn multiple_codings_and_duplicates() {
        let a = VaccineMetadata::new(
            vec![Coding::new(CVX_SYSTEM, "900"), Coding::new("urn:alt", "A")],
            CvxStatus::Active,
            1,
            14,
        );
        let b = VaccineMetadata::new(vec![Coding::new("urn:alt", "A")], CvxStatus::NonUs, 1, 14);

        let s = MemoVaccineCatalog::from_entries(vec![a.clone(), b.clone()]);

        assert_eq!(s.lookup(CVX_SYSTEM, "900"), Some(&a));
        // last write wins
        assert_eq!(s.lookup("urn:alt", "A"), Some(&b));
        assert_eq!(s.all().len(), 2);
    }

    #[test]
    fn separator_in_fields_does_not_collide() {
        let a = VaccineMetadata::new(vec![Coding::new("urn:a#b", "c")], CvxStatus::Active, 1, 14);
        let b = VaccineMetadata::new(vec![Coding::new("urn:a", "b#c")], CvxStatus::Active, 2, 14);

        let s = MemoVaccineCatalog::from_entries(vec![a.clone(), b.clone()]);

        assert_eq!(s.lookup("urn:a#b", "c"), Some(&a));
        assert_eq!(s.lookup("urn:a", "b#c"), Some(&b));
    }
}

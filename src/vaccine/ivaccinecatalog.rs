// Copyright 2023 Contributors to the dhcverify project.
// SPDX-License-Identifier: Apache-2.0

use super::errors::Error;
use super::metadata::VaccineMetadata;
use super::region::{Region, TrustPolicy};

/// Interface to the read-only store of vaccine reference data.
pub trait IVaccineCatalog {
    /// Lookup a vaccine given one of its codings
    fn lookup(&self, system: &str, code: &str) -> Option<&VaccineMetadata>;

    /// Lookup a vaccine by its catalog identifier
    fn lookup_by_id(&self, id: &str) -> Option<&VaccineMetadata>;

    /// All known vaccines, in catalog order
    fn all(&self) -> Vec<&VaccineMetadata>;

    /// The trust policy in force for `region`
    fn policy(&self, region: Region) -> Result<&dyn TrustPolicy, Error>;

    /// All vaccines trusted in `region`, in catalog order.  Fails if no
    /// policy is known for the region.
    fn trusted_for_region(&self, region: Region) -> Result<Vec<&VaccineMetadata>, Error> {
        let policy = self.policy(region)?;

        Ok(self
            .all()
            .into_iter()
            .filter(|vmd| policy.is_trusted(vmd))
            .collect())
    }
}

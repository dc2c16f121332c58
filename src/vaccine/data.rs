// Copyright 2023 Contributors to the dhcverify project.
// SPDX-License-Identifier: Apache-2.0

// See https://www.cdc.gov/vaccines/programs/iis/COVID-19-related-codes.html
// Dosing criteria follow the CommonPass recommendations.

use super::metadata::{Coding, CvxStatus, VaccineMetadata, CVX_SYSTEM};

/// The built-in COVID-19 vaccine reference table, in catalog order
pub(crate) fn covid_vaccines() -> Vec<VaccineMetadata> {
    vec![
        VaccineMetadata::new(vec![Coding::new(CVX_SYSTEM, "207")], CvxStatus::Active, 2, 14)
            .with_days_between_doses(24, 92)
            .with_names("Moderna COVID-19 Vaccine", "Moderna US Inc"),
        VaccineMetadata::new(vec![Coding::new(CVX_SYSTEM, "208")], CvxStatus::Active, 2, 14)
            .with_days_between_doses(17, 92)
            .with_names("Pfizer-BioNTech COVID-19 Vaccine", "Pfizer, Inc"),
        VaccineMetadata::new(vec![Coding::new(CVX_SYSTEM, "210")], CvxStatus::NonUs, 2, 14)
            .with_names("AstraZeneca COVID-19 Vaccine", "AstraZeneca"),
        VaccineMetadata::new(vec![Coding::new(CVX_SYSTEM, "212")], CvxStatus::Active, 1, 14)
            .with_names("Janssen COVID-19 Vaccine", "Janssen"),
    ]
}

// Copyright 2023 Contributors to the dhcverify project.
// SPDX-License-Identifier: Apache-2.0

//! The vaccine module provides the read-only reference data used to appraise
//! immunization records: which products exist, how they are coded, how many
//! doses they need, and which regions trust them.
//!
//! ```
//! use dhcverify::vaccine::{IVaccineCatalog, MemoVaccineCatalog, Region, CVX_SYSTEM};
//!
//! let catalog = MemoVaccineCatalog::new();
//!
//! let moderna = catalog.lookup(CVX_SYSTEM, "207").expect("known CVX code");
//! assert_eq!(moderna.doses, 2);
//!
//! let trusted = catalog.trusted_for_region(Region::Usa).expect("supported region");
//! assert_eq!(trusted.len(), 3);
//! ```

pub use self::errors::Error;
pub use self::ivaccinecatalog::IVaccineCatalog;
pub use self::memo_vaccinecatalog::MemoVaccineCatalog;
pub use self::metadata::{Coding, CvxStatus, DoseInterval, VaccineMetadata, CVX_SYSTEM};
pub use self::region::{ActiveStatusPolicy, Region, TrustPolicy};

mod data;
mod errors;
mod ivaccinecatalog;
mod memo_vaccinecatalog;
mod metadata;
mod region;

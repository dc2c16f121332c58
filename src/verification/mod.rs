// Copyright 2023 Contributors to the dhcverify project.
// SPDX-License-Identifier: Apache-2.0

//! The verification module provides a [`Processor`] that collects the
//! evidence gathered while checking a health card and rolls it up into a
//! single [`CardVerificationState`].
//!
//! Evidence falls in three groups:
//! * card structure: signature checked, key fetched, signature valid, expired
//! * issuer: on the trusted list
//! * immunization: derived by appraising the card's doses against the
//!   vaccine catalog with [`Processor::verify_immunization`]
//!
//! # Example
//!
//! ```
//! use dhcverify::vaccine::{Coding, MemoVaccineCatalog, Region, CVX_SYSTEM};
//! use dhcverify::verification::{CardVerificationState, Dose, Processor};
//!
//! // one catalog, shared by every verification
//! let catalog = MemoVaccineCatalog::new();
//!
//! let mut p = Processor::new(&catalog);
//!
//! // outcome of the signature check and issuer lookup
//! p.set_signature_checked();
//! p.set_fetched_key();
//! p.set_signature_valid();
//! p.set_issuer_trusted();
//!
//! let moderna = Coding::new(CVX_SYSTEM, "207");
//! let doses = vec![
//!     Dose::new(moderna.clone(), "2021-03-16"),
//!     Dose::new(moderna, "2021-04-06"),
//! ];
//!
//! let met = p
//!     .verify_immunization(Region::Usa, &doses)
//!     .expect("appraising doses");
//! assert!(met);
//!
//! let results = p.get_results();
//! assert_eq!(results.state, CardVerificationState::Valid);
//! ```

pub use self::dose::{Dose, DoseStatus};
pub use self::errors::Error;
pub use self::immunization::{parse_occurrence, DoseSpacingPolicy, UncheckedSpacing};
pub use self::model::*;
pub use self::processor::Processor;

mod dose;
mod errors;
mod immunization;
mod model;
mod processor;

// Copyright 2023 Contributors to the dhcverify project.
// SPDX-License-Identifier: Apache-2.0

use crate::vaccine;

#[derive(thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("Mixed vaccine identity: {0}")]
    MixedVaccineIdentity(String),
    #[error("Bad occurrence format: {0}")]
    OccurrenceFormat(String),
    #[error("Vaccine catalog error: {0}")]
    Catalog(#[from] vaccine::Error),
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MixedVaccineIdentity(e) | Error::OccurrenceFormat(e) => {
                write!(f, "{}", e)
            }
            Error::Catalog(e) => write!(f, "{:?}", e),
        }
    }
}

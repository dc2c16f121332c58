// Copyright 2023 Contributors to the dhcverify project.
// SPDX-License-Identifier: Apache-2.0

#[derive(thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("Region not supported: {0}")]
    RegionNotSupported(String),
    #[error("Unknown region: {0}")]
    UnknownRegion(String),
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::RegionNotSupported(e) | Error::UnknownRegion(e) => {
                write!(f, "{}", e)
            }
        }
    }
}

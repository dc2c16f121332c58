// Copyright 2023 Contributors to the dhcverify project.
// SPDX-License-Identifier: Apache-2.0

use super::errors::Error;
use super::metadata::{CvxStatus, VaccineMetadata};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A jurisdiction whose policy decides which vaccine products are trusted
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Usa,
    Eu,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Usa => write!(f, "usa"),
            Region::Eu => write!(f, "eu"),
        }
    }
}

impl FromStr for Region {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "usa" | "us" => Ok(Region::Usa),
            "eu" => Ok(Region::Eu),
            x => Err(Error::UnknownRegion(x.to_string())),
        }
    }
}

/// Decides whether a vaccine product is trusted in a region
pub trait TrustPolicy: fmt::Debug + Send + Sync {
    fn is_trusted(&self, vmd: &VaccineMetadata) -> bool;
}

/// Trusts products whose CVX status is `Active`
#[derive(Debug, Default, Clone, Copy)]
pub struct ActiveStatusPolicy;

impl TrustPolicy for ActiveStatusPolicy {
    fn is_trusted(&self, vmd: &VaccineMetadata) -> bool {
        vmd.status == CvxStatus::Active
    }
}

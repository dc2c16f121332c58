// Copyright 2023 Contributors to the dhcverify project.
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt;

/// The rolled-up verification state of a card
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardVerificationState {
    /// No verifications have been performed
    Unknown,
    /// The digital signature was checked with a valid key and does not match
    Corrupt,
    /// The card signature could not be verified
    Unverified,
    /// The card is authentic but the immunization criteria were not met
    SafetyCriteriaNotMet,
    /// The issuer is not on the trusted list
    IssuerUnknown,
    /// The card has expired
    Expired,
    /// Card structure is valid, the immunization criteria are met, and the
    /// issuer is trusted
    Valid,
}

impl fmt::Display for CardVerificationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CardVerificationState::Unknown => "unknown",
            CardVerificationState::Corrupt => "corrupt",
            CardVerificationState::Unverified => "unverified",
            CardVerificationState::SafetyCriteriaNotMet => "safety_criteria_not_met",
            CardVerificationState::IssuerUnknown => "issuer_unknown",
            CardVerificationState::Expired => "expired",
            CardVerificationState::Valid => "valid",
        };
        write!(f, "{s}")
    }
}

/// All verification results for a card
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardVerificationResults {
    /// The rolled-up state
    pub state: CardVerificationState,
    pub card_structure: CardStructureVerificationResults,
    pub issuer: IssuerVerificationResults,
    pub immunization: ImmunizationVerificationResults,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardStructureVerificationResults {
    pub all_checks_passed: bool,

    /// False if the verifier chose not to check the signature
    pub signature_checked: bool,

    /// The verification key was retrieved
    pub fetched_key: bool,

    /// The signature was checked and is valid
    pub signature_valid: bool,

    /// The card carries an expiry date which has passed
    pub expired: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuerVerificationResults {
    pub all_checks_passed: bool,

    /// The issuer is on the trusted list
    pub trusted: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImmunizationVerificationResults {
    pub all_checks_passed: bool,
    pub unknown_vaccine_type: bool,
    pub trusted_vaccine_type: bool,
    pub met_doses_required_criteria: bool,
    pub met_days_between_doses_criteria: bool,
    pub met_days_since_last_dose_criteria: bool,
}

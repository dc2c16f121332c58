// Copyright 2023 Contributors to the dhcverify project.
// SPDX-License-Identifier: Apache-2.0

use super::dose::Dose;
use super::errors::Error;
use super::immunization::{occurrences, shared_coding, DoseSpacingPolicy, UncheckedSpacing};
use super::model::*;
use crate::vaccine::{IVaccineCatalog, Region};
use bitmask::*;
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

bitmask! {
    #[derive(Debug)]
    mask StructureFacts: u8 where flags StructureFact {
        SignatureChecked = 0x01,
        FetchedKey       = 0x02,
        SignatureValid   = 0x04,
        Expired          = 0x08,
    }
}

bitmask! {
    #[derive(Debug)]
    mask IssuerFacts: u8 where flags IssuerFact {
        Trusted = 0x01,
    }
}

bitmask! {
    #[derive(Debug)]
    mask ImmunizationFacts: u8 where flags ImmunizationFact {
        UnknownVaccineType        = 0x01,
        TrustedVaccineType        = 0x02,
        MetDosesRequired          = 0x04,
        MetDaysBetweenDoses       = 0x08,
        MetDaysSinceLastDose      = 0x10,
        Appraised                 = 0x20,
    }
}

/// Accumulates the evidence gathered while verifying one card and rolls it
/// up into a [`CardVerificationState`].
///
/// Facts are only ever recorded, never withdrawn, with one exception: each
/// call to [`Processor::verify_immunization`] replaces the immunization facts
/// recorded by the previous call.  The state is recomputed from the facts on
/// every query.  Until the immunization criteria have been appraised (or an
/// immunization fact recorded), an authentic card is reported as
/// [`CardVerificationState::Unknown`].
///
/// A processor is meant to be used by a single verification pass and then
/// dropped.  The vaccine catalog it reads from is shared.
#[derive(Debug)]
pub struct Processor<'a, C: IVaccineCatalog> {
    catalog: &'a C,
    spacing: Box<dyn DoseSpacingPolicy>,
    card_structure: StructureFacts,
    issuer: IssuerFacts,
    immunization: ImmunizationFacts,
    /// Set as soon as any evidence is recorded
    touched: bool,
}

impl<'a, C: IVaccineCatalog> Processor<'a, C> {
    pub fn new(catalog: &'a C) -> Self {
        Self {
            catalog,
            spacing: Box::new(UncheckedSpacing),
            card_structure: StructureFacts::none(),
            issuer: IssuerFacts::none(),
            immunization: ImmunizationFacts::none(),
            touched: false,
        }
    }

    /// Use `policy` to appraise the spacing between doses
    pub fn with_spacing_policy(mut self, policy: impl DoseSpacingPolicy + 'static) -> Self {
        self.spacing = Box::new(policy);
        self
    }

    /// Return the current verification results, including the rolled-up
    /// state
    pub fn get_results(&self) -> CardVerificationResults {
        CardVerificationResults {
            state: self.state(),
            card_structure: CardStructureVerificationResults {
                all_checks_passed: self.card_structure_verified(),
                signature_checked: self.structure_has(StructureFact::SignatureChecked),
                fetched_key: self.structure_has(StructureFact::FetchedKey),
                signature_valid: self.structure_has(StructureFact::SignatureValid),
                expired: self.structure_has(StructureFact::Expired),
            },
            issuer: IssuerVerificationResults {
                all_checks_passed: self.issuer_verified(),
                trusted: self.issuer_has(IssuerFact::Trusted),
            },
            immunization: ImmunizationVerificationResults {
                all_checks_passed: self.immunization_criteria_met(),
                unknown_vaccine_type: self.immunization_has(ImmunizationFact::UnknownVaccineType),
                trusted_vaccine_type: self.immunization_has(ImmunizationFact::TrustedVaccineType),
                met_doses_required_criteria: self.immunization_has(ImmunizationFact::MetDosesRequired),
                met_days_between_doses_criteria: self.immunization_has(ImmunizationFact::MetDaysBetweenDoses),
                met_days_since_last_dose_criteria: self.immunization_has(ImmunizationFact::MetDaysSinceLastDose),
            },
        }
    }

    /// The rolled-up state.  The checks are ordered by severity and the
    /// first one that fails decides the state.
    pub fn state(&self) -> CardVerificationState {
        if !self.touched {
            return CardVerificationState::Unknown;
        }

        if self.card_corrupted() {
            return CardVerificationState::Corrupt;
        }

        if !self.card_structure_verified() {
            return CardVerificationState::Unverified;
        }

        if !self.immunization_has(ImmunizationFact::Appraised) {
            return CardVerificationState::Unknown;
        }

        if !self.immunization_criteria_met() {
            return CardVerificationState::SafetyCriteriaNotMet;
        }

        if !self.issuer_verified() {
            return CardVerificationState::IssuerUnknown;
        }

        if self.structure_has(StructureFact::Expired) {
            return CardVerificationState::Expired;
        }

        CardVerificationState::Valid
    }

    //
    // Card structure
    //

    /// True if the signature was checked with a fetched key and did not
    /// validate
    pub fn card_corrupted(&self) -> bool {
        self.structure_has(StructureFact::SignatureChecked)
            && self.structure_has(StructureFact::FetchedKey)
            && !self.structure_has(StructureFact::SignatureValid)
    }

    /// True if the signature was checked with a fetched key and validated.
    /// Expiry is not part of this check.
    pub fn card_structure_verified(&self) -> bool {
        self.structure_has(StructureFact::SignatureChecked)
            && self.structure_has(StructureFact::FetchedKey)
            && self.structure_has(StructureFact::SignatureValid)
    }

    /// Record that the signature was checked.  A verifier that skips the
    /// signature check must not call this.
    pub fn set_signature_checked(&mut self) {
        self.record_structure(StructureFact::SignatureChecked);
    }

    pub fn set_fetched_key(&mut self) {
        self.record_structure(StructureFact::FetchedKey);
    }

    pub fn set_signature_valid(&mut self) {
        self.record_structure(StructureFact::SignatureValid);
    }

    pub fn set_expired(&mut self) {
        self.record_structure(StructureFact::Expired);
    }

    //
    // Issuer
    //

    pub fn issuer_verified(&self) -> bool {
        self.issuer_has(IssuerFact::Trusted)
    }

    /// Record that the issuer is on the trusted list
    pub fn set_issuer_trusted(&mut self) {
        self.issuer.set(IssuerFact::Trusted);
        self.touched = true;
    }

    //
    // Immunization criteria
    //

    pub fn immunization_criteria_met(&self) -> bool {
        !self.immunization_has(ImmunizationFact::UnknownVaccineType)
            && self.immunization_has(ImmunizationFact::TrustedVaccineType)
            && self.immunization_has(ImmunizationFact::MetDosesRequired)
            && self.immunization_has(ImmunizationFact::MetDaysSinceLastDose)
            && self.immunization_has(ImmunizationFact::MetDaysBetweenDoses)
    }

    pub fn set_unknown_vaccine_type(&mut self) {
        self.record_immunization(ImmunizationFact::UnknownVaccineType);
    }

    pub fn set_trusted_vaccine_type(&mut self) {
        self.record_immunization(ImmunizationFact::TrustedVaccineType);
    }

    pub fn set_met_doses_required_criteria(&mut self) {
        self.record_immunization(ImmunizationFact::MetDosesRequired);
    }

    pub fn set_met_days_between_doses_criteria(&mut self) {
        self.record_immunization(ImmunizationFact::MetDaysBetweenDoses);
    }

    pub fn set_met_days_since_last_dose_criteria(&mut self) {
        self.record_immunization(ImmunizationFact::MetDaysSinceLastDose);
    }

    /// Appraise `doses` against the immunization criteria of `region`, as of
    /// now.  See [`Processor::verify_immunization_at`].
    pub fn verify_immunization(&mut self, region: Region, doses: &[Dose]) -> Result<bool, Error> {
        self.verify_immunization_at(region, doses, Utc::now())
    }

    /// Appraise `doses` against the immunization criteria of `region`, as of
    /// `now`, and record the outcome of each criterion.  Returns whether all
    /// criteria are met.
    ///
    /// Immunization facts from any previous call are discarded first.  An
    /// error means the doses could not be appraised (mixed products, a
    /// malformed occurrence, or a region without a trust policy); facts
    /// recorded before the failure are left in place.
    pub fn verify_immunization_at(
        &mut self,
        region: Region,
        doses: &[Dose],
        now: DateTime<Utc>,
    ) -> Result<bool, Error> {
        self.immunization = ImmunizationFacts::none();
        self.record_immunization(ImmunizationFact::Appraised);

        let r = self.appraise_doses(region, doses, now);

        if let Err(e) = &r {
            warn!(%region, error = %e, "immunization appraisal aborted");
        }

        r
    }

    fn appraise_doses(
        &mut self,
        region: Region,
        doses: &[Dose],
        now: DateTime<Utc>,
    ) -> Result<bool, Error> {
        if doses.is_empty() {
            debug!("no doses to appraise");
            return Ok(false);
        }

        let coding = shared_coding(doses)?;

        let catalog = self.catalog;
        let vmd = match catalog.lookup(&coding.system, &coding.code) {
            None => {
                debug!(%coding, "unknown vaccine type");
                self.set_unknown_vaccine_type();
                return Ok(false);
            }
            Some(vmd) => vmd,
        };

        if catalog.policy(region)?.is_trusted(vmd) {
            self.set_trusted_vaccine_type();
        } else {
            debug!(id = %vmd.id, %region, "vaccine not trusted in region");
        }

        // without enough doses the date checks are meaningless
        if doses.len() < vmd.doses as usize {
            debug!(
                given = doses.len(),
                required = vmd.doses,
                "not enough doses"
            );
            return Ok(false);
        }
        self.set_met_doses_required_criteria();

        let occurrences = occurrences(doses)?;
        let last = match occurrences.last() {
            None => {
                debug!("no dose carries an occurrence");
                return Ok(false);
            }
            Some(t) => *t,
        };

        let protected_from = Duration::try_days(i64::from(vmd.days_since_last_dose))
            .and_then(|d| now.checked_sub_signed(d));

        // out-of-range day counts can never be satisfied
        if protected_from.is_some_and(|t| t > last) {
            self.set_met_days_since_last_dose_criteria();
        } else {
            debug!(%last, required_days = vmd.days_since_last_dose, "last dose too recent");
        }

        if self.spacing.is_satisfied(vmd, &occurrences) {
            self.set_met_days_between_doses_criteria();
        }

        Ok(self.immunization_criteria_met())
    }

    fn structure_has(&self, f: StructureFact) -> bool {
        self.card_structure.contains(f)
    }

    fn issuer_has(&self, f: IssuerFact) -> bool {
        self.issuer.contains(f)
    }

    fn immunization_has(&self, f: ImmunizationFact) -> bool {
        self.immunization.contains(f)
    }

    fn record_structure(&mut self, f: StructureFact) {
        self.card_structure.set(f);
        self.touched = true;
    }

    fn record_immunization(&mut self, f: ImmunizationFact) {
        self.immunization.set(f);
        self.immunization.set(ImmunizationFact::Appraised);
        self.touched = true;
    }
}

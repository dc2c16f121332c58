// Copyright 2023 Contributors to the dhcverify project.
// SPDX-License-Identifier: Apache-2.0

//! Digital health card verification.
//!
//! This crate decides whether a vaccination credential should be trusted by
//! rolling up three independent lines of evidence into one verdict:
//! * Card structure: the signature was checked against a retrieved key and
//!   is valid, and the card has not expired
//! * Issuer: the issuer is on a trusted list
//! * Immunization: the doses on the card satisfy the criteria of a region
//!
//! Decoding the credential, checking its signature and looking up its issuer
//! are left to the caller, which reports the outcome to a
//! [`verification::Processor`].  The immunization criteria are appraised by
//! the processor itself using the reference data in a
//! [`vaccine::MemoVaccineCatalog`].

pub mod vaccine;
pub mod verification;

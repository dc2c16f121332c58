use clap::Parser;
use dhcverify::vaccine::{IVaccineCatalog, MemoVaccineCatalog, Region, VaccineMetadata};
use dhcverify::verification::{CardVerificationResults, Dose, Processor};
use serde::Deserialize;
use std::error::Error;
use std::fs;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
enum DhcVerifyCli {
    Vaccines(VaccinesArgs),
    Verify(VerifyArgs),
}

#[derive(Debug, clap::Args)]
#[command(author, version, long_about = None,
    about = "List the vaccines in the built-in catalog, optionally only those \
    trusted in the given region")]
struct VaccinesArgs {
    #[arg(short, long)]
    region: Option<Region>,
}

#[derive(Debug, clap::Args)]
#[command(author, version, long_about = None,
    about = "Roll up the supplied card evidence and appraise the supplied \
    doses against the immunization criteria of the given region")]
struct VerifyArgs {
    #[arg(short, long, default_value = "doses.json")]
    doses: String,

    #[arg(short, long, default_value = "evidence.json")]
    evidence: String,

    #[arg(short, long, default_value = "usa")]
    region: Region,
}

/// Outcome of the signature and issuer checks, as reported by the collaborators
/// that performed them
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CardEvidence {
    signature_checked: bool,
    fetched_key: bool,
    signature_valid: bool,
    expired: bool,
    issuer_trusted: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("dhcverify=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let catalog = MemoVaccineCatalog::new();

    match DhcVerifyCli::parse() {
        DhcVerifyCli::Vaccines(args) => match vaccines(&catalog, &args) {
            Ok(v) => println!("{}", serde_json::to_string_pretty(&v)?),
            Err(e) => eprintln!("listing vaccines failed: {e}"),
        },

        DhcVerifyCli::Verify(args) => match verify(&catalog, &args) {
            Ok(r) => println!("{}", serde_json::to_string_pretty(&r)?),
            Err(e) => eprintln!("verification failed: {e}"),
        },
    }

    Ok(())
}

fn vaccines<'a>(
    catalog: &'a MemoVaccineCatalog,
    args: &VaccinesArgs,
) -> Result<Vec<&'a VaccineMetadata>, Box<dyn Error>> {
    match args.region {
        None => Ok(catalog.all()),
        Some(region) => Ok(catalog.trusted_for_region(region)?),
    }
}

fn verify(
    catalog: &MemoVaccineCatalog,
    args: &VerifyArgs,
) -> Result<CardVerificationResults, Box<dyn Error>> {
    let j = fs::read_to_string(&args.evidence)?;
    let evidence: CardEvidence = serde_json::from_str(&j)?;

    let j = fs::read_to_string(&args.doses)?;
    let doses: Vec<Dose> = serde_json::from_str(&j)?;

    let mut p = Processor::new(catalog);

    if evidence.signature_checked {
        p.set_signature_checked();
    }
    if evidence.fetched_key {
        p.set_fetched_key();
    }
    if evidence.signature_valid {
        p.set_signature_valid();
    }
    if evidence.expired {
        p.set_expired();
    }
    if evidence.issuer_trusted {
        p.set_issuer_trusted();
    }

    let met = p.verify_immunization(args.region, &doses)?;
    tracing::info!(region = %args.region, doses = doses.len(), met, "immunization appraised");

    Ok(p.get_results())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_EVIDENCE_OK: &str = include_str!("../testdata/evidence-ok.json");

    #[test]
    fn evidence_defaults_to_false() {
        let e: CardEvidence = serde_json::from_str(r#"{"fetched_key": true}"#).unwrap();

        assert!(e.fetched_key);
        assert!(!e.signature_checked);
        assert!(!e.issuer_trusted);
    }

    #[test]
    fn evidence_fixture() {
        let e: CardEvidence = serde_json::from_str(TEST_EVIDENCE_OK).unwrap();

        assert!(e.signature_checked && e.fetched_key && e.signature_valid && e.issuer_trusted);
        assert!(!e.expired);
    }
}

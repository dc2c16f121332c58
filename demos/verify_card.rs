// Copyright 2023 Contributors to the dhcverify project.
// SPDX-License-Identifier: Apache-2.0

extern crate dhcverify;

use dhcverify::vaccine::{Coding, MemoVaccineCatalog, Region, CVX_SYSTEM};
use dhcverify::verification::{Dose, Processor};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let catalog = MemoVaccineCatalog::new();

    let janssen = Coding::new(CVX_SYSTEM, "212");
    let cards = vec![
        ("single dose", vec![Dose::new(janssen.clone(), "2021-03-16")]),
        (
            "mixed products",
            vec![
                Dose::new(janssen, "2021-03-16"),
                Dose::new(Coding::new(CVX_SYSTEM, "208"), "2021-04-06"),
            ],
        ),
    ];

    for (name, doses) in cards {
        let mut p = Processor::new(&catalog);

        p.set_signature_checked();
        p.set_fetched_key();
        p.set_signature_valid();
        p.set_issuer_trusted();

        if let Err(e) = p.verify_immunization(Region::Usa, &doses) {
            println!("{name}: doses not appraised: {e}");
            continue;
        }

        println!(
            "{name}: {}",
            serde_json::to_string_pretty(&p.get_results())?
        );
    }

    Ok(())
}

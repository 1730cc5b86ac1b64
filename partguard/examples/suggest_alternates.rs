//! Classify an MPN and rank alternates from a small candidate list.
//!
//! Usage: cargo run --example suggest_alternates [MPN] [CANDIDATE...]

use partguard::prelude::*;

const DEFAULT_CANDIDATES: &[&str] = &[
    "LM358DR",
    "LM358PWR",
    "LM324N",
    "LM2904DR",
    "TL072CP",
    "TS912IN",
];

fn main() -> Result<(), PartGuardError> {
    let mut args = std::env::args().skip(1);
    let mpn = args.next().unwrap_or_else(|| "LM358N".to_string());
    let mut candidates: Vec<String> = args.collect();
    if candidates.is_empty() {
        candidates = DEFAULT_CANDIDATES.iter().map(|s| s.to_string()).collect();
    }

    let classifier = PartClassifier::with_builtin_handlers()?;
    let info = classifier.classify(&mpn);

    println!("Part: {}", info.mpn);
    match info.manufacturer {
        Some(manufacturer) => {
            println!("  Manufacturer: {}", manufacturer);
            println!("  Series:       {}", info.series);
            println!("  Package:      {}", info.package_code);
            let types: Vec<&str> = info.types.iter().map(|t| t.name()).collect();
            println!("  Types:        {}", types.join(", "));
        }
        None => println!("  Not recognized by any handler"),
    }
    println!();

    let ranked = classifier.suggest_alternates(&mpn, candidates.iter().map(String::as_str));
    if ranked.is_empty() {
        println!("No alternates above {:.2}", classifier.options().min_alternate_score);
        return Ok(());
    }

    println!("Alternates:");
    for alt in &ranked {
        let marker = if alt.official_replacement { "✓" } else { " " };
        println!("  {} {:<20} {:.3}", marker, alt.mpn, alt.score);
        if !alt.official_replacement {
            println!("      {}", classifier.explain_replacement(&mpn, &alt.mpn));
        }
    }

    Ok(())
}

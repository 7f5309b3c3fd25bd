//! Generates TypeScript units from a schema snapshot file.
//!
//! Run with: `cargo run --example generate -- <snapshot.json> [output-dir]`

use shapegen::prelude::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let snapshot = args
        .next()
        .ok_or("usage: generate <snapshot.json> [output-dir]")?;
    let output = args.next().unwrap_or_else(|| "dbschema/edgeql".to_string());

    let source = JsonSnapshotSource::new(&snapshot);
    let mut sink = DirectorySink::new(&output);

    let summary = Pipeline::new(GeneratorConfig::default())
        .run(&source, &mut sink)
        .await?;

    println!(
        "Wrote {} units to {} ({} enums, {} object types)",
        summary.units, output, summary.enums, summary.objects
    );
    if summary.ambiguities > 0 {
        println!("{} ambiguous cast pairs, see log", summary.ambiguities);
    }

    Ok(())
}

use std::{env, path::PathBuf};

use dbspec::{DbSpecConfig, EngineRegistry, IdentityTranslator, LabelTranslator};
use tracing_subscriber::EnvFilter;

fn usage() {
    eprintln!("Usage: print_grains <dialect> <column> [config.toml]");
    eprintln!("Example: cargo run --example print_grains -- postgres created_at");
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = env::args().skip(1).collect::<Vec<_>>();
    if args.len() < 2 {
        usage();
        std::process::exit(1);
    }

    let dialect = args.remove(0);
    let column = args.remove(0);
    let config = match args.first() {
        Some(path) => DbSpecConfig::from_file(PathBuf::from(path))?,
        None => DbSpecConfig::default(),
    };

    let registry = EngineRegistry::from_config(&config)?;
    let engine = registry.resolve(&dialect)?;
    let translator: &dyn LabelTranslator = if config.labels.is_empty() {
        &IdentityTranslator
    } else {
        &config.labels
    };

    for grain in engine.grains() {
        println!(
            "{:<24} {}",
            grain.localized_label(translator),
            grain.render(&column)
        );
    }
    match engine.epoch_seconds_sql(&column) {
        Ok(sql) => println!("{:<24} {sql}", "epoch_s"),
        Err(e) => println!("{:<24} -- {e}", "epoch_s"),
    }
    if let Ok(sql) = engine.epoch_millis_sql(&column) {
        println!("{:<24} {sql}", "epoch_ms");
    }
    println!("{}", serde_json::to_string_pretty(&registry.summary(engine.dialect_id())?)?);
    Ok(())
}

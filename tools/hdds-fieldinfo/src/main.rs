// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use anyhow::{bail, Context, Result};
use hdds_fieldinfo::report::{render_report, to_json};
use hdds_fieldinfo::{
    resolve_unit, Backend, BackendConfig, HeaderSink, HeaderWriter, IdlUnit, LanguageMapping,
};
use std::env;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

struct ResolveArgs {
    unit: PathBuf,
    config: Option<PathBuf>,
    mapping: Option<LanguageMapping>,
    header: Option<PathBuf>,
    json: bool,
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_help();
        return;
    }

    match args[1].as_str() {
        "resolve" => {
            if let Err(e) = run_resolve(&args[2..]) {
                eprintln!("[ERROR] {:#}", e);
                std::process::exit(1);
            }
        }
        "--help" | "-h" | "help" => {
            print_help();
        }
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            print_help();
            std::process::exit(1);
        }
    }
}

fn parse_resolve_args(args: &[String]) -> Result<ResolveArgs> {
    let mut unit = None;
    let mut config = None;
    let mut mapping = None;
    let mut header = None;
    let mut json = false;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                config = Some(PathBuf::from(iter.next().context("--config needs a path")?));
            }
            "--header" => {
                header = Some(PathBuf::from(iter.next().context("--header needs a path")?));
            }
            "--mapping" => {
                mapping = Some(match iter.next().map(String::as_str) {
                    Some("classic") => LanguageMapping::Classic,
                    Some("modern") => LanguageMapping::Modern,
                    Some(other) => bail!("unknown language mapping `{}`", other),
                    None => bail!("--mapping needs `classic` or `modern`"),
                });
            }
            "--json" => json = true,
            flag if flag.starts_with("--") => bail!("unknown option `{}`", flag),
            path if unit.is_none() => unit = Some(PathBuf::from(path)),
            extra => bail!("unexpected argument `{}`", extra),
        }
    }

    Ok(ResolveArgs {
        unit: unit.context("missing IDL unit file")?,
        config,
        mapping,
        header,
        json,
    })
}

fn run_resolve(args: &[String]) -> Result<()> {
    let args = parse_resolve_args(args)?;

    let mut config = match &args.config {
        Some(path) => BackendConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => BackendConfig::default(),
    };
    if let Some(mapping) = args.mapping {
        config.language_mapping = mapping;
    }
    init_tracing(&config.log_level);

    tracing::info!("Loading IDL unit from: {:?}", args.unit);
    let unit = IdlUnit::from_file(&args.unit)
        .with_context(|| format!("Failed to load {}", args.unit.display()))?;

    match &args.header {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let writer = emit(&unit, config, HeaderWriter::new(BufWriter::new(file)), args.json)?;
            let bytes = writer.bytes_written();
            writer.into_inner().context("Failed to flush header")?;
            tracing::info!("[OK] Wrote {} header bytes to {:?}", bytes, path);
        }
        None => {
            let header = emit(&unit, config, String::new(), args.json)?;
            if !header.is_empty() && !args.json {
                println!("--- header ---");
                print!("{header}");
            }
        }
    }
    Ok(())
}

fn emit<S: HeaderSink>(unit: &IdlUnit, config: BackendConfig, sink: S, json: bool) -> Result<S> {
    let mut backend = Backend::new(config, sink);
    let info = resolve_unit(unit, &mut backend).context("Failed to resolve unit")?;

    let output = if json {
        to_json(info.iter()).context("Failed to serialize descriptors")?
    } else {
        render_report(info.iter()).context("Failed to render report")?
    };
    println!("{output}");

    let helpers = info.helper_keys();
    tracing::info!(
        "{} descriptors, {} distinct element/length helpers",
        info.len(),
        helpers.len()
    );

    backend.finish().context("Failed to finish header")
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_help() {
    println!("hdds-fieldinfo v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("USAGE:");
    println!("    hdds-fieldinfo <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    resolve <UNIT>  Resolve array/sequence descriptors of an IDL unit (YAML or JSON)");
    println!("    help            Print this help message");
    println!();
    println!("OPTIONS:");
    println!("    --config <FILE>     Backend configuration (YAML)");
    println!("    --mapping <MODE>    Override the language mapping (classic | modern)");
    println!("    --header <FILE>     Write the generated header to FILE");
    println!("    --json              Print descriptors as JSON");
    println!();
    println!("EXAMPLES:");
    println!("    hdds-fieldinfo resolve sensors.yaml --mapping modern --header sensors_tags.h");
    println!();
}

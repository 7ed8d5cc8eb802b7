//! # probanno - Reaction Likelihoods from Similarity Hits
//!
//! Command-line front end for the probabilistic annotation pipeline.
//!
//! ## Usage
//!
//! ```bash
//! # Reaction likelihoods to stdout
//! probanno -i genome.blastp.tsv -r target_roles.tsv -c complex_roles.tsv -x reaction_complexes.tsv
//!
//! # Hits from stdin, every stage table written to a directory
//! blastp -query genome.faa -db reference -outfmt 6 \
//!     | probanno -r target_roles.tsv -c complex_roles.tsv -x reaction_complexes.tsv \
//!         -o genome.rxnprobs -t tables --prefix genome
//! ```
//!
//! ## Options
//!
//! - `-i, --input <FILE>`: Tabular hit file (default: stdin)
//! - `-r, --target-roles <FILE>`: Target gene to roles table
//! - `-c, --complex-roles <FILE>`: Complex to required roles table
//! - `-x, --reaction-complexes <FILE>`: Reaction to complexes table
//! - `-u, --reference-roles <FILE>`: Role universe, one per line (default: roles of all targets)
//! - `-o, --output <FILE>`: Reaction table (default: stdout)
//! - `-t, --tables <DIR>`: Write every stage table to this directory
//! - `--prefix <NAME>`: File name prefix for `--tables` (default: probanno)
//! - `--pseudo-count <FLOAT>`: Roleset smoothing term (default: 40)
//! - `--dilution-percent <FLOAT>`: Support cutoff, percent of the maximum (default: 80)
//! - `--min-evalue <FLOAT>`: E-value floor (default: 1e-200)
//! - `--separator <TOKEN>`: Multi-value separator (default: ///)
//! - `-j, --threads <N>`: Worker threads (default: all cores)
//! - `-q, --quiet`: Only log warnings and errors
//!
//! Logging goes to stderr; `RUST_LOG` overrides the level.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use probanno_core::LikelihoodPipeline;
use probanno_core::config::PipelineConfig;
use probanno_core::constants::DEFAULT_SEPARATOR;
use probanno_core::hits::{HitTable, read_hits_file};
use probanno_core::output::{OutputTable, write_table};
use probanno_core::reference::{ReferenceData, read_role_list, read_table};
use probanno_core::results::PipelineResults;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("probanno")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Reaction likelihoods from sequence-similarity hits")
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Tabular hit file (default: stdin)"),
        )
        .arg(
            Arg::new("target-roles")
                .short('r')
                .long("target-roles")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .required(true)
                .help("Target gene to roles table"),
        )
        .arg(
            Arg::new("complex-roles")
                .short('c')
                .long("complex-roles")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .required(true)
                .help("Complex to required roles table"),
        )
        .arg(
            Arg::new("reaction-complexes")
                .short('x')
                .long("reaction-complexes")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .required(true)
                .help("Reaction to catalyzing complexes table"),
        )
        .arg(
            Arg::new("reference-roles")
                .short('u')
                .long("reference-roles")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Role universe, one role per line (default: roles of all targets)"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Reaction table (default: stdout)"),
        )
        .arg(
            Arg::new("tables")
                .short('t')
                .long("tables")
                .value_name("DIR")
                .value_parser(value_parser!(PathBuf))
                .help("Write every stage table to this directory"),
        )
        .arg(
            Arg::new("prefix")
                .long("prefix")
                .value_name("NAME")
                .default_value("probanno")
                .help("File name prefix for --tables"),
        )
        .arg(
            Arg::new("pseudo-count")
                .long("pseudo-count")
                .value_name("FLOAT")
                .value_parser(value_parser!(f64))
                .default_value("40")
                .help("Roleset smoothing term"),
        )
        .arg(
            Arg::new("dilution-percent")
                .long("dilution-percent")
                .value_name("FLOAT")
                .value_parser(value_parser!(f64))
                .default_value("80")
                .help("Support cutoff as a percentage of the maximum likelihood"),
        )
        .arg(
            Arg::new("min-evalue")
                .long("min-evalue")
                .value_name("FLOAT")
                .value_parser(value_parser!(f64))
                .default_value("1e-200")
                .help("E-value floor before the logarithm"),
        )
        .arg(
            Arg::new("separator")
                .long("separator")
                .value_name("TOKEN")
                .default_value(DEFAULT_SEPARATOR)
                .help("Separator of multi-valued fields"),
        )
        .arg(
            Arg::new("threads")
                .short('j')
                .long("threads")
                .value_name("N")
                .value_parser(value_parser!(usize))
                .help("Worker threads (default: all cores)"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Only log warnings and errors"),
        )
}

fn main() {
    let matches = cli().get_matches();
    let quiet = matches.get_flag("quiet");
    init_tracing(quiet);

    if let Err(err) = run(&matches, quiet) {
        error!(error = %err, "run failed");
        for cause in err.chain().skip(1) {
            error!(cause = %cause, "caused by");
        }
        std::process::exit(1);
    }
}

fn init_tracing(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn config_from_matches(matches: &ArgMatches, quiet: bool) -> PipelineConfig {
    let defaults = PipelineConfig::default();
    PipelineConfig {
        pseudo_count: matches
            .get_one::<f64>("pseudo-count")
            .copied()
            .unwrap_or(defaults.pseudo_count),
        dilution_percent: matches
            .get_one::<f64>("dilution-percent")
            .copied()
            .unwrap_or(defaults.dilution_percent),
        min_evalue: matches
            .get_one::<f64>("min-evalue")
            .copied()
            .unwrap_or(defaults.min_evalue),
        separator: matches
            .get_one::<String>("separator")
            .cloned()
            .unwrap_or(defaults.separator),
        max_evalue: defaults.max_evalue,
        num_threads: matches.get_one::<usize>("threads").copied(),
        quiet,
    }
}

fn path_arg<'a>(matches: &'a ArgMatches, id: &str) -> Result<&'a Path> {
    matches
        .get_one::<PathBuf>(id)
        .map(PathBuf::as_path)
        .with_context(|| format!("missing required argument --{id}"))
}

fn load_reference(matches: &ArgMatches, separator: &str) -> Result<ReferenceData> {
    let read = |id: &str| -> Result<_> {
        let path = path_arg(matches, id)?;
        read_table(path, separator)
            .with_context(|| format!("failed to read {}", path.display()))
    };
    let targets = read("target-roles")?;
    let complexes = read("complex-roles")?;
    let reactions = read("reaction-complexes")?;

    let mut reference = ReferenceData::new(&targets, complexes, reactions);
    if let Some(path) = matches.get_one::<PathBuf>("reference-roles") {
        let roles = read_role_list(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        reference = reference.with_reference_roles(roles);
    }

    info!(
        targets = reference.target_count(),
        reference_roles = reference.reference_role_count(),
        complexes = reference.complexes().len(),
        reactions = reference.reactions().len(),
        "loaded reference data"
    );
    Ok(reference)
}

fn load_hits(matches: &ArgMatches, pipeline: &LikelihoodPipeline) -> Result<HitTable> {
    let parser = pipeline.hit_parser()?;
    let hits = match matches.get_one::<PathBuf>("input") {
        Some(path) => read_hits_file(path, &parser)
            .with_context(|| format!("failed to read hits from {}", path.display()))?,
        None => parser
            .parse(io::stdin().lock())
            .context("failed to read hits from stdin")?,
    };
    info!(
        queries = hits.len(),
        hits = hits.total_hits(),
        "loaded similarity hits"
    );
    Ok(hits)
}

fn write_tables(
    dir: &Path,
    prefix: &str,
    results: &PipelineResults,
    separator: &str,
) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    for table in OutputTable::ALL {
        let path = dir.join(format!("{prefix}.{}", table.extension()));
        let file =
            File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        write_table(&mut writer, results, table, separator)
            .with_context(|| format!("failed to write {table} to {}", path.display()))?;
        writer.flush()?;
    }
    info!(dir = %dir.display(), prefix, "wrote stage tables");
    Ok(())
}

fn run(matches: &ArgMatches, quiet: bool) -> Result<()> {
    let pipeline = LikelihoodPipeline::new(config_from_matches(matches, quiet));
    pipeline.config.validate()?;
    let separator = pipeline.config.separator.clone();

    let reference = load_reference(matches, &separator)?;
    let hits = load_hits(matches, &pipeline)?;
    let results = pipeline.run(&hits, &reference)?;

    let mut writer: Box<dyn Write> = match matches.get_one::<PathBuf>("output") {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout())),
    };
    write_table(&mut writer, &results, OutputTable::Reactions, &separator)?;
    writer.flush()?;

    if let Some(dir) = matches.get_one::<PathBuf>("tables") {
        let prefix = matches
            .get_one::<String>("prefix")
            .map_or("probanno", String::as_str);
        write_tables(dir, prefix, &results, &separator)?;
    }

    info!(summary = %results.summary, "run complete");
    Ok(())
}

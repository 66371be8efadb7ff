use anyhow::{Context, Result};
use scoring_core::ScoringPipeline;
use scoring_ingest::read_dataset;
use scoring_map::report_from_profiles;
use scoring_model::ScoringOptions;
use scoring_standards::CountryTable;
use scoring_cli::inputs::{ConfigSource, load_country_table, load_options, load_process_config};
use scoring_cli::logging::redact_value;
use tracing::{info_span, trace, warn};

use crate::cli::{Cli, CountriesArgs, DetectArgs, ProcessArgs, ResolveArgs};
use crate::summary::{print_countries, print_process_summary, print_profiles, print_resolutions};

struct Inputs {
    table: CountryTable,
    options: ScoringOptions,
}

fn load_inputs(cli: &Cli) -> Result<Inputs> {
    Ok(Inputs {
        table: load_country_table(cli.countries.as_deref())?,
        options: load_options(cli.options.as_deref())?,
    })
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{json}");
    Ok(())
}

pub fn run_detect(cli: &Cli, args: &DetectArgs) -> Result<()> {
    let span = info_span!("detect_command", input = %args.input.display());
    let _guard = span.enter();

    let inputs = load_inputs(cli)?;
    let dataset = read_dataset(&args.input)
        .with_context(|| format!("read dataset {}", args.input.display()))?;
    let pipeline = ScoringPipeline::new(&inputs.table).with_options(inputs.options);

    let profiles = pipeline.profile(&dataset);
    let report = report_from_profiles(&profiles);
    if report.country_columns.is_empty() {
        warn!("no column looks like a country column");
    }
    if args.explain {
        print_profiles(&profiles);
    }
    print_json(&report)
}

pub fn run_process(cli: &Cli, args: &ProcessArgs) -> Result<()> {
    let span = info_span!("process_command", input = %args.input.display());
    let _guard = span.enter();

    let source = ConfigSource::from_arg(args.config.as_deref(), args.config_json.as_deref())
        .context("either --config or --config-json is required")?;
    let config = load_process_config(&source)?;
    let inputs = load_inputs(cli)?;
    let dataset = read_dataset(&args.input)
        .with_context(|| format!("read dataset {}", args.input.display()))?;
    let pipeline = ScoringPipeline::new(&inputs.table).with_options(inputs.options);

    let output = pipeline
        .process_with_summary(&dataset, &config)
        .context("invalid process configuration")?;
    for value in &output.summary.unresolved_values {
        trace!(country = redact_value(value), "country not resolved");
    }
    if args.summary {
        print_process_summary(&output.summary);
    }
    print_json(&output.records)
}

pub fn run_resolve(cli: &Cli, args: &ResolveArgs) -> Result<()> {
    let inputs = load_inputs(cli)?;
    let pipeline = ScoringPipeline::new(&inputs.table).with_options(inputs.options);
    let resolutions = pipeline.resolver().resolve_many(&args.texts);
    print_resolutions(&args.texts, &resolutions);
    Ok(())
}

pub fn run_countries(cli: &Cli, args: &CountriesArgs) -> Result<()> {
    let table = load_country_table(cli.countries.as_deref())?;
    print_countries(&table, args.all);
    Ok(())
}

use clap::Parser;
use dac2bids_core::cli::{Cli, OutputFormat};
use dac2bids_core::{DicomMetadataSource, FolderOrchestrator, Manifest, Result, TextReport};
use log::{error, info};
use std::process;

fn main() {
    let cli = Cli::parse();

    // Setup logging
    setup_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        error!("{}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let orchestrator = FolderOrchestrator::new(
        &cli.input_folder,
        &cli.output_folder,
        cli.orchestrator_options(),
    )?;

    let plan = orchestrator.run(&DicomMetadataSource::new())?;
    println!("{}", TextReport::new(&plan));

    let manifest = Manifest::from_records(plan.records());
    let content = render(&manifest, cli.format)?;

    if cli.dry_run {
        println!();
        println!("{}", content);
        return Ok(());
    }

    let path = cli.manifest_path(orchestrator.subject_index(), orchestrator.session_index());
    std::fs::write(&path, content)?;
    info!("Wrote {}", path.display());

    Ok(())
}

fn render(manifest: &Manifest, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => manifest.to_yaml(),
        OutputFormat::Json => {
            #[cfg(feature = "json")]
            {
                manifest.to_json()
            }
            #[cfg(not(feature = "json"))]
            {
                Err(dac2bids_core::Dac2BidsError::SerializationError(
                    "JSON output requires the 'json' feature; rebuild with --features json"
                        .to_string(),
                ))
            }
        }
    }
}

fn setup_logging(verbose: bool) {
    if verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }
}

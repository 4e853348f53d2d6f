mod adapters;
mod application;
mod cli;
mod config;
mod ports;
mod shared;
mod study;

use adapters::outbound::console::StderrProgressReporter;
use adapters::outbound::filesystem::{
    CsvDatasetRepository, FileReportArchive, JsonPipelineStateStore, RegistryEnvFile,
};
use adapters::outbound::process::{
    AzureCliAuthenticator, DockerEngine, PathToolLocator, TerraformProvisioner, TrivyScanner,
};
use application::dto::{RequiredTool, ScanRequest, Stage};
use application::use_cases::{
    AuthenticateRegistryUseCase, CheckPrerequisitesUseCase, ConsolidateDatasetUseCase,
    MirrorImagesUseCase, PipelineTracker, ProvisionInfrastructureUseCase, ScanTimepointUseCase,
};
use clap::Parser;
use cli::{Args, Command};
use config::StudyConfig;
use ports::outbound::RegistryConfigStore;
use shared::error::ExitCode;
use shared::Result;
use std::env;
use std::process;
use study::domain::{PipelineStage, PipelineState, RegistryConfig, Timepoint};

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // --help and --version also arrive here
            let code = if e.use_stderr() {
                ExitCode::InvalidArguments
            } else {
                ExitCode::Success
            };
            let _ = e.print();
            process::exit(code.as_i32());
        }
    };

    shared::logger::init(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        for cause in e.chain().skip(1) {
            eprintln!("\nCaused by: {}", cause);
        }

        eprintln!();
        let code = ExitCode::for_error(&e);
        log::debug!("Exiting with {}", code);
        process::exit(code.as_i32());
    }
}

fn run(args: Args) -> Result<()> {
    let working_dir = env::current_dir()?;
    let config = StudyConfig::load(args.config.as_deref(), &working_dir)?;
    log::debug!(
        "Tracking {} image(s), failure policy {}, data in {}",
        config.images.len(),
        config.failure_policy,
        config.data_dir.display()
    );

    let tracker = PipelineTracker::new(JsonPipelineStateStore::new(&config.data_dir));
    let registry = prepare_stage(&args.command, &config)?;

    match args.command {
        Command::Check => {
            CheckPrerequisitesUseCase::new(PathToolLocator::new(), StderrProgressReporter::new())
                .execute_verbose(&RequiredTool::ALL)?;
        }
        Command::Status => {
            print_status(&tracker.status()?, &config);
        }
        Command::Provision => {
            ProvisionInfrastructureUseCase::new(
                TerraformProvisioner::new(config.infra_dir.clone()),
                RegistryEnvFile::new(config.registry_env_file.clone()),
                StderrProgressReporter::new(),
            )
            .execute()?;
            tracker.record(PipelineStage::Provisioned)?;
        }
        // Login already happened while preparing the stage
        Command::Authenticate => {}
        Command::Mirror => {
            let registry = registry_or_load(registry, &config)?;
            MirrorImagesUseCase::new(DockerEngine::new(), StderrProgressReporter::new())
                .execute(&config.images, &registry)?;
            tracker.record(PipelineStage::ImagesPushed)?;
        }
        Command::Scan { timepoint } => {
            let registry = registry_or_load(registry, &config)?;
            scan(timepoint, registry, &config)?;
            tracker.record(PipelineStage::Scanned(timepoint))?;
        }
        Command::Consolidate => {
            ConsolidateDatasetUseCase::new(
                CsvDatasetRepository::new(&config.data_dir),
                StderrProgressReporter::new(),
            )
            .execute()?;
            tracker.record(PipelineStage::Consolidated)?;
        }
    }

    Ok(())
}

/// Loads registry coordinates, checks local tools and logs in, as the
/// command's stage requires, in that order.
///
/// Returns the registry coordinates when the stage talks to the registry.
fn prepare_stage(command: &Command, config: &StudyConfig) -> Result<Option<RegistryConfig>> {
    let Some(stage) = command.stage() else {
        return Ok(None);
    };

    let registry = if stage.needs_registry() {
        Some(load_registry(config)?)
    } else {
        None
    };

    ensure_tools(stage)?;

    if let Some(registry) = &registry {
        authenticate(registry)?;
    }
    Ok(registry)
}

fn registry_or_load(registry: Option<RegistryConfig>, config: &StudyConfig) -> Result<RegistryConfig> {
    match registry {
        Some(registry) => Ok(registry),
        None => load_registry(config),
    }
}

fn load_registry(config: &StudyConfig) -> Result<RegistryConfig> {
    RegistryEnvFile::new(config.registry_env_file.clone()).load()
}

fn ensure_tools(stage: Stage) -> Result<()> {
    log::debug!("Checking tools required by {}", stage);
    CheckPrerequisitesUseCase::new(PathToolLocator::new(), StderrProgressReporter::new())
        .execute(stage.required_tools())?;
    Ok(())
}

fn authenticate(registry: &RegistryConfig) -> Result<()> {
    AuthenticateRegistryUseCase::new(AzureCliAuthenticator::new(), StderrProgressReporter::new())
        .execute(registry)
}

fn scan(timepoint: Timepoint, registry: RegistryConfig, config: &StudyConfig) -> Result<()> {
    let use_case = ScanTimepointUseCase::new(
        DockerEngine::new(),
        TrivyScanner::new(),
        CsvDatasetRepository::new(&config.data_dir),
        FileReportArchive::new(&config.data_dir),
        StderrProgressReporter::new(),
    );

    let request = ScanRequest::new(
        timepoint,
        config.images.clone(),
        registry,
        config.severities.clone(),
        config.failure_policy,
    );

    let response = use_case.execute(request)?;
    if !response.is_complete() {
        log::warn!(
            "{} finished with {} skipped image(s)",
            response.timepoint,
            response.skipped.len()
        );
    }
    Ok(())
}

fn print_status(state: &PipelineState, config: &StudyConfig) {
    let or_dash = |value: Option<&str>| value.unwrap_or("-").to_string();

    println!("Pipeline state: {}", state.current_label());
    println!("  {:<15} {}", "provisioned", or_dash(state.provisioned_at.as_deref()));
    println!("  {:<15} {}", "images pushed", or_dash(state.images_pushed_at.as_deref()));
    for timepoint in Timepoint::ALL {
        println!(
            "  {:<15} {}",
            format!("{} scanned", timepoint),
            or_dash(state.scanned_at(timepoint))
        );
    }
    println!("  {:<15} {}", "consolidated", or_dash(state.consolidated_at.as_deref()));
    println!("Data directory: {}", config.data_dir.display());
}

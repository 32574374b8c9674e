use checktable::utils::{logger, validation::Validate};
use checktable::{CheckEngine, CheckPipeline, CliConfig, LocalStorage, ProjectLayout};
use clap::Parser;

/// Exit status when --strict is set and the checks found errors.
const FINDINGS_EXIT_CODE: i32 = 4;

/// Exit status for command line usage errors, shared with config errors.
const USAGE_EXIT_CODE: i32 = 1;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = match CliConfig::try_parse() {
        Ok(cli) => cli,
        // --help and --version also land here and keep clap's own status.
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(USAGE_EXIT_CODE);
        }
    };

    // The project config can set the log level, so load it before logging starts.
    let project = match cli.project_config() {
        Ok(project) => project,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", cli.config_path().display(), e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    let log_format = cli
        .log_format
        .or_else(|| project.log_format().ok().flatten())
        .unwrap_or_default();
    logger::init_cli_logger(cli.verbose, project.logging.level.as_deref(), log_format);

    tracing::info!("Starting checktable");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
        tracing::debug!("Project config: {:?}", project);
    }

    let layout = match project
        .validate()
        .and_then(|_| ProjectLayout::new(&cli.raw_file, &project.paths))
    {
        Ok(layout) => layout,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    };

    if cli.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(&cli.root);
    let pipeline = CheckPipeline::new(storage, layout, cli.analyses());
    let engine = CheckEngine::new_with_monitoring(pipeline, cli.monitor);

    match engine.run().await {
        Ok(outcome) => {
            if cli.print {
                for (_, report) in engine.pipeline().render_reports(&outcome.findings) {
                    println!("{}", report);
                }
            }

            if outcome.has_errors() && (cli.strict || project.strict()) {
                tracing::warn!("Errors found in '{}'", outcome.findings.table_name);
                std::process::exit(FINDINGS_EXIT_CODE);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Check failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}

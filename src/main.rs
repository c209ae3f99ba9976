use clap::Parser;
use weights_csv::utils::{logger, validation::Validate};
use weights_csv::{CliConfig, ConvertError, EtlEngine, LocalStorage, WeightsPipeline};

fn main() {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose, cli.log_format);

    tracing::info!("Starting weights-csv");
    tracing::debug!("CLI config: {:?}", cli);

    let config = match cli.resolve().and_then(|config| config.validate().map(|_| config)) {
        Ok(config) => config,
        Err(e) => fail(e),
    };
    tracing::debug!("Resolved config: {:?}", config);

    let pipeline = WeightsPipeline::new(LocalStorage::new(), config);
    let engine = EtlEngine::new(pipeline);

    let result = if cli.dry_run {
        engine.dry_run()
    } else {
        engine.run()
    };

    match result {
        Ok(summary) if cli.dry_run => {
            println!(
                "Dry run: {} rows would be written to {}",
                summary.rows,
                summary.output_path.display()
            );
        }
        Ok(summary) => {
            println!("Converted file saved to {}", summary.output_path.display());
        }
        Err(e) => fail(e),
    }
}

fn fail(e: ConvertError) -> ! {
    tracing::error!("Conversion failed: {} (Category: {:?})", e, e.category());
    tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("error: {}", e.user_friendly_message());
    eprintln!("hint: {}", e.recovery_suggestion());

    std::process::exit(e.exit_code())
}

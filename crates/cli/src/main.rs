use anyhow::{Context, Result};
use clap::Parser;
use encfix_cli::args::Args;
use encfix_cli::config::Config;
use encfix_cli::options::OutputFormat;
use encfix_cli::presentation;
use encfix_engine::rewriter::AtomicRewriter;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();
    init_logger(args.verbose);

    let config = Config::from(&args);
    log::debug!("{config:?}");

    match run(&config, args.format) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config, format: OutputFormat) -> Result<()> {
    let text = format == OutputFormat::Text;
    if text {
        println!("{}", presentation::header(config));
    }

    // ファイル単位の失敗はレポートに集計され、ここに届くのは列挙の失敗のみ
    let report = encfix_engine::run_with(config, &AtomicRewriter::new(), |file| {
        if text
            && let Some(line) = presentation::file_line(file, config.command, config.dry_run)
        {
            println!("{line}");
        }
    })
    .context("failed to walk directory")?;

    match format {
        OutputFormat::Text => println!("{}", presentation::summary(&report)),
        OutputFormat::Json => println!("{}", presentation::json(&report)?),
    }
    Ok(())
}

fn init_logger(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

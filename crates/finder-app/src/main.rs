mod cli;
mod driver;
mod protocol;

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use finder_common::FinderError;
use finder_config::FinderConfig;
use finder_core::SearchOptions;

use crate::driver::Driver;
use crate::protocol::{Request, Response};

/// Build the log filter: `RUST_LOG` first, then the CLI override or the
/// configured level, then any extra configured directives.
fn log_filter(args: &cli::Args, config: &FinderConfig) -> EnvFilter {
    let level = args
        .log_level
        .as_deref()
        .unwrap_or(config.logging.level.as_filter());
    let mut filter = EnvFilter::from_default_env();
    for directive in std::iter::once(level).chain(config.logging.directives.iter().map(String::as_str)) {
        match directive.parse() {
            Ok(d) => filter = filter.add_directive(d),
            Err(e) => eprintln!("ignoring log directive {directive:?}: {e}"),
        }
    }
    filter
}

fn search_options(args: &cli::Args, config: &FinderConfig) -> SearchOptions {
    let defaults = SearchOptions::from(&config.search);
    SearchOptions {
        match_case: args.match_case || defaults.match_case,
        whole_word: args.whole_word || defaults.whole_word,
    }
}

fn run(args: &cli::Args, config: &FinderConfig) -> Result<(), FinderError> {
    let html = std::fs::read_to_string(&args.file)?;
    let doc = finder_dom::parse_html(&html)?;
    let mut driver = Driver::new(doc, config);

    let replies = match (&args.script, &args.query) {
        (Some(script), _) => {
            let script = std::fs::read_to_string(script)?;
            driver.run_script(&script)
        }
        (None, Some(query)) => {
            let request = Request::PerformSearch {
                search_text: query.clone(),
                options: search_options(args, config),
            };
            vec![driver.handle(request)?]
        }
        (None, None) => {
            return Err(FinderError::Other(
                "nothing to do: pass --query or --script".into(),
            ))
        }
    };

    for reply in &replies {
        println!("{}", reply.to_json());
    }
    if args.print_html {
        println!("{}", driver.document().to_html());
    }

    let failed = replies
        .iter()
        .filter(|r| matches!(r, Response::Error { .. }))
        .count();
    if failed > 0 {
        tracing::warn!(failed, total = replies.len(), "some requests failed");
    }
    driver.finish();
    Ok(())
}

fn main() -> ExitCode {
    let args = cli::parse();

    // Config first: it decides the default log level
    let config_result = finder_config::load_config(args.config.as_deref());
    let config = config_result.as_ref().cloned().unwrap_or_default();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(&args, &config))
        .init();

    tracing::info!("textfinder v{} starting", env!("CARGO_PKG_VERSION"));
    match &config_result {
        Ok(_) => match &args.config {
            Some(path) => tracing::info!(path = %path.display(), "using config override"),
            None => tracing::debug!("config loaded"),
        },
        Err(e) => tracing::warn!("Config load failed, using defaults: {e}"),
    }

    match run(&args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(file = %args.file.display(), "{e}");
            eprintln!("textfinder: {e}");
            ExitCode::FAILURE
        }
    }
}

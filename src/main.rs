use crate::config::Config;
use crate::diagnostics::TracingDiagnostics;
use crate::mailer::BrevoMailer;
use crate::persist::{output_path, write_json, JsonSink, PersistenceSink, XlsxSink};
use crate::pipeline::{HttpRenderer, ThreadSleeper};
use crate::runner::{run_once, run_spec_pass, Notifier};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod diagnostics;
mod domain;
mod errors;
mod extract;
mod mailer;
mod persist;
mod pipeline;
mod runner;

#[cfg(test)]
mod tests;

/// Scrape autotrader.ca listings and email the ones priced well below market.
#[derive(Debug, Parser)]
#[command(name = "autotrader_watch", version)]
struct Args {
    /// Number of result pages to scrape (overrides AUTOTRADER_PAGES)
    #[arg(long)]
    pages: Option<u32>,

    /// Minimum discount in dollars (overrides AUTOTRADER_THRESHOLD)
    #[arg(long)]
    threshold: Option<u64>,

    /// Also read the specification card of every scraped listing
    #[arg(long)]
    specs: bool,

    /// Cap on listings visited by --specs
    #[arg(long, requires = "specs")]
    spec_limit: Option<usize>,

    /// Save data but do not send the email
    #[arg(long)]
    no_email: bool,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,autotrader_watch=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("Run failed: {e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), errors::PipelineError> {
    let mut cfg = Config::from_env()?;
    if let Some(pages) = args.pages {
        cfg.num_pages = pages;
    }
    if let Some(threshold) = args.threshold {
        cfg.threshold = threshold;
    }
    cfg.validate()?;

    tracing::info!(
        pages = cfg.num_pages,
        threshold = cfg.threshold,
        "Starting the scraping process..."
    );

    let diag = TracingDiagnostics;
    let started = chrono::Local::now().naive_local();
    let sinks: Vec<Box<dyn PersistenceSink>> = vec![
        Box::new(JsonSink::new(output_path(&cfg.output_dir, "autotrader_data", started, "json"))),
        Box::new(XlsxSink::new(output_path(&cfg.output_dir, "autotrader_data", started, "xlsx"))),
    ];

    let mailer = cfg.email.as_ref().map(|email| {
        (
            BrevoMailer::new(
                email.brevo_api_key.clone(),
                email.sender_email.clone(),
                email.sender_name.clone(),
            ),
            email,
        )
    });
    let notifier = match (&mailer, args.no_email) {
        (Some((sink, email)), false) => Some(Notifier { sink, email }),
        _ => None,
    };

    let renderer = HttpRenderer::new(cfg.wait_timeout)?;
    let report = run_once(
        &cfg,
        renderer,
        ThreadSleeper,
        rand::thread_rng(),
        &sinks,
        notifier,
        &diag,
    )?;

    tracing::info!(
        total = report.records.len(),
        matches = report.matches.len(),
        pages = report.pages_requested,
        pages_succeeded = report.pages_succeeded(),
        "Total cars found: {}",
        report.records.len()
    );

    if args.specs {
        let renderer = HttpRenderer::new(cfg.wait_timeout)?;
        let sheets = run_spec_pass(
            &cfg,
            renderer,
            ThreadSleeper,
            rand::thread_rng(),
            &report.links(),
            args.spec_limit,
            &diag,
        )?;
        let path = output_path(&cfg.output_dir, "autotrader_specs", started, "json");
        write_json(&path, &sheets)?;
        tracing::info!(sheets = sheets.len(), path = %path.display(), "Specifications saved");
    }

    Ok(())
}

//! Wiring for one run: config, renderer, session, outputs.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use sortviz_core::{RunConfig, SortSession};
use sortviz_render::render_loop::{self, LoopOptions, LoopSummary};
use sortviz_render::{HeadlessRenderer, TerminalRenderer};

use crate::cli::Cli;
use crate::error::{AppError, Result};
use crate::logging::init_tracing;

/// Run the sort `cli` describes and write the requested outputs.
pub fn run_app(cli: &Cli) -> Result<()> {
    init_tracing(cli.log_file.as_deref())?;

    let mut config = cli.run_config();
    config.validate()?;
    let seed = config.resolve_seed();
    let input = config.input();
    tracing::info!(
        algorithm = %config.algorithm,
        items = config.items,
        fps = config.fps,
        seed,
        headless = cli.headless,
        "starting run"
    );

    let options = LoopOptions::from_config(&config).exit_on_finish(cli.exits_on_finish());
    let summary = if cli.headless {
        let session = SortSession::spawn(config.algorithm, input)?;
        render_loop::run(session, HeadlessRenderer::new(), options)?
    } else {
        // the terminal comes first so a failure leaves no producer behind
        let mut renderer = TerminalRenderer::stdout().map_err(AppError::Terminal)?;
        let session = SortSession::spawn(config.algorithm, input)?;
        let result = render_loop::run(session, &mut renderer, options);
        renderer.restore()?;
        result?
    };

    if let Some(path) = cli.trace.as_deref() {
        write_file(path, |out| summary.log.write_jsonl(out).map_err(AppError::from))?;
        tracing::info!(path = %path.display(), events = summary.log.len(), "trace written");
    }
    if let Some(path) = cli.report.as_deref() {
        write_file(path, |out| summary.report.write_json(out).map_err(AppError::from))?;
        tracing::info!(path = %path.display(), "frame report written");
    }

    write_summary(io::stdout().lock(), &config, seed, &summary)?;
    Ok(())
}

fn write_file<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    let file = File::create(path).map_err(|source| AppError::output(path, source))?;
    let mut out = BufWriter::new(file);
    write(&mut out).map_err(|error| match error {
        AppError::Io(source) => AppError::output(path, source),
        other => other,
    })
}

/// One-line run summary, e.g.
/// `Bubble sort: 100 items, 2512 exchanges, 4950 comparisons, 1.73s, seed 7`.
pub fn write_summary<W: Write>(
    mut out: W,
    config: &RunConfig,
    seed: u64,
    summary: &LoopSummary,
) -> io::Result<()> {
    let stats = summary.outcome.stats;
    let ending = if summary.outcome.is_completed() {
        ""
    } else {
        " (quit before finishing)"
    };
    writeln!(
        out,
        "{}: {} items, {} exchanges, {} comparisons, {:.2}s, seed {}{}",
        config.algorithm.label(),
        config.items,
        stats.exchanges,
        stats.comparisons,
        summary.elapsed.as_secs_f64(),
        seed,
        ending,
    )
}

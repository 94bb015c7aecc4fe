use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;

use datagrid::cli::{CliArgs, OutputMode, StartupConfig};
use datagrid::config::GridConfig;
use datagrid::config_paths;
use datagrid::grid::measurer_for;
use datagrid::messages::{DataMsg, ViewMsg};
use datagrid::model::{GridModel, SortDirection};
use datagrid::runtime::App;
use datagrid::source::HttpDataSource;
use datagrid::view::{export_csv, render_table, TableStyle};

/// Give up after this many failed fetches in a row
const MAX_CONSECUTIVE_FAILURES: usize = 3;
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

fn main() -> Result<()> {
    datagrid::tracing::init();

    let result = run();
    if let Err(e) = &result {
        tracing::error!("{:#}", e);
        if let Some(log) = config_paths::log_file() {
            eprintln!("Details were logged to {}", log.display());
        }
    }
    result
}

fn run() -> Result<()> {
    let args = CliArgs::parse();
    let base = match &args.config {
        Some(path) => GridConfig::from_path(path)?,
        None => GridConfig::load(),
    };
    let startup = args.into_config(base).map_err(anyhow::Error::msg)?;

    let measurer = measurer_for(startup.grid.font_path.as_deref());
    let source = Arc::new(HttpDataSource::new(startup.grid.endpoint.clone()));
    let model = GridModel::new(startup.grid.clone(), measurer);
    let mut app = App::new(model, source, startup.window_rows);

    app.start();
    load_pages(&mut app, startup.pages)?;
    apply_view_state(&mut app, &startup);
    write_output(&app, &startup)
}

/// Scroll to the end until `pages` pages are loaded or the server runs out
fn load_pages(app: &mut App, pages: usize) -> Result<()> {
    let mut failures = 0;
    loop {
        if !app.model().is_loading() {
            if app.model().page_count() >= pages || !app.model().has_more() {
                return Ok(());
            }
            app.scroll_to_end();
            if !app.model().is_loading() {
                // The sentinel already fired for this row; ask directly
                app.dispatch(DataMsg::RequestNextPage);
            }
        }

        if !app.wait_for_message(FETCH_TIMEOUT) {
            bail!("Timed out after {:?} waiting for a page", FETCH_TIMEOUT);
        }

        match app.model().last_error() {
            Some(e) => {
                failures += 1;
                if failures >= MAX_CONSECUTIVE_FAILURES {
                    bail!("Giving up after {} failed fetches: {}", failures, e);
                }
            }
            None => failures = 0,
        }
    }
}

fn apply_view_state(app: &mut App, startup: &StartupConfig) {
    for field in &startup.pins {
        app.dispatch(ViewMsg::TogglePin(field.clone()));
    }
    if let Some((field, direction)) = &startup.sort {
        let clicks = match direction {
            SortDirection::None => 0,
            SortDirection::Ascending => 1,
            SortDirection::Descending => 2,
        };
        for _ in 0..clicks {
            app.dispatch(ViewMsg::ActivateHeader(field.clone()));
        }
    }
    if let Some(term) = &startup.search {
        app.dispatch(ViewMsg::SetSearch(term.clone()));
    }
}

fn write_output(app: &App, startup: &StartupConfig) -> Result<()> {
    let render = app.model().render_model();
    match &startup.output {
        OutputMode::Table => {
            let style = TableStyle {
                char_width_px: startup.grid.font_size_px * 0.6,
                ansi: std::env::var_os("NO_COLOR").is_none(),
            };
            let table = render_table(&render, app.model().theme(), &style);
            std::io::stdout()
                .write_all(table.as_bytes())
                .context("Failed to write table")?;
        }
        OutputMode::Json => {
            let stdout = std::io::stdout();
            serde_json::to_writer_pretty(stdout.lock(), &render)
                .context("Failed to write JSON")?;
            println!();
        }
        OutputMode::Csv(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            export_csv(&render, file)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Wrote {} rows to {}", render.rows.len(), path.display());
        }
    }
    Ok(())
}

use queuezero_core::{BoardConfigExt, BoardError, KeyValueStorage};
use queuezero_types::LocationSummary;
use std::io::Write;

use crate::CliContext;

/// One board row as printed in the terminal
pub fn format_row(index: usize, row: &LocationSummary) -> String {
    format!(
        "{:<3} {:<18} {:<18} {:<10} {:<34} {}",
        index,
        row.name,
        row.average_text(),
        row.severity.busy_label(),
        format!("{} ({})", row.confidence.label(), row.submissions_text()),
        row.staleness
    )
}

pub async fn show_board(ctx: &CliContext) {
    let board = ctx.board.read().await;

    println!(
        "{:<3} {:<18} {:<18} {:<10} {:<34} Updated",
        "#", "Location", "Average", "Busy", "Confidence"
    );
    println!("{}", "-".repeat(100));

    // Recomputed on every call so staleness text is current
    for (index, row) in board.summaries().iter().enumerate() {
        println!("{}", format_row(index, row));
    }
}

pub async fn show_form(ctx: &CliContext) {
    let board = ctx.board.read().await;
    let form = board.form();
    let name = board
        .selected_location()
        .map(|l| l.name.as_str())
        .unwrap_or("none");
    println!(
        "Selected: {} ({}), pending wait: {} min",
        name, form.selected, form.pending_wait
    );
}

/// Resolve a location given either by index or by name.
async fn resolve_index(
    ctx: &CliContext,
    index: Option<usize>,
    name: Option<&str>,
) -> Result<usize, String> {
    match (index, name) {
        (Some(index), _) => Ok(index),
        (None, Some(name)) => ctx
            .board
            .read()
            .await
            .position(name)
            .ok_or_else(|| format!("error: no location named '{name}'\n")),
        (None, None) => Err("error: give a location --index or --name\n".to_string()),
    }
}

pub async fn select(ctx: &CliContext, index: Option<usize>, name: Option<&str>) -> Result<(), String> {
    let index = resolve_index(ctx, index, name).await?;
    ctx.board
        .write()
        .await
        .select_location(index)
        .map_err(|e| format!("error: {e}\n"))?;
    show_form(ctx).await;
    Ok(())
}

pub async fn set_wait(ctx: &CliContext, minutes: u32) {
    ctx.board.write().await.set_pending_wait(i64::from(minutes));
    show_form(ctx).await;
}

pub async fn submit(ctx: &CliContext) -> Result<(), String> {
    let result = ctx.board.write().await.submit();
    report_outcome(ctx, result).await
}

pub async fn report(
    ctx: &CliContext,
    index: Option<usize>,
    name: Option<&str>,
    minutes: u32,
) -> Result<(), String> {
    let index = resolve_index(ctx, index, name).await?;
    let result = ctx.board.write().await.report(index, i64::from(minutes));
    report_outcome(ctx, result).await
}

async fn report_outcome(ctx: &CliContext, result: Result<(), BoardError>) -> Result<(), String> {
    match result {
        Ok(()) => {}
        // The report is on the board even though it was not saved
        Err(e @ BoardError::Persist(_)) => println!("warning: {e}"),
        Err(e) => return Err(format!("error: {e}\n")),
    }

    let board = ctx.board.read().await;
    let selected = board.form().selected;
    if let Some(row) = board.summary(selected) {
        println!("{}", format_row(selected, &row));
    }
    Ok(())
}

pub async fn show_config(ctx: &CliContext) {
    let config = ctx.config.read().await;
    match queuezero_core::BoardConfig::config_path() {
        Ok(path) => println!("Config file:    {}", path.display()),
        Err(e) => println!("Config file:    unavailable ({e})"),
    }
    println!("Data directory: {}", config.data_dir().display());
    println!("Storage file:   {}", ctx.board.read().await.storage().path().display());

    let stored = ctx
        .board
        .read()
        .await
        .storage()
        .get_item(queuezero_core::STORAGE_KEY);
    match stored {
        Ok(Some(raw)) => println!("Stored blob:    {} bytes", raw.len()),
        Ok(None) => println!("Stored blob:    none"),
        Err(e) => println!("Stored blob:    unreadable ({e})"),
    }
}

pub fn exit() -> Result<(), String> {
    write!(std::io::stdout(), "quitting...").map_err(|e| e.to_string())?;
    std::io::stdout().flush().map_err(|e| e.to_string())
}

//! Shot command handlers.

use anyhow::Result;
use tracing::warn;

use barista_core::{Shot, ShotInput};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{format_tags, print_separator, truncate_string};
use crate::record_commands::ShotArgs;

/// Record a shot.
///
/// A shot for a bean id that does not exist is still saved; it is reported
/// with a warning and shows up as "Unknown" in exports.
pub async fn add(ctx: &CliContext, args: ShotArgs) -> Result<()> {
    let records = ctx.records().await?;
    let shot = records
        .add_shot(ShotInput::from(args))
        .await
        .map_err(CliError::from)?;

    if records
        .get_bean(shot.bean_id)
        .await
        .map_err(CliError::from)?
        .is_none()
    {
        warn!(bean_id = shot.bean_id, "Shot references a bean that does not exist");
    }

    println!(
        "Saved shot {} - {}g in, {}g out, {}s, ratio 1:{}",
        shot.id, shot.dose_in, shot.yield_out, shot.extraction_time, shot.brew_ratio
    );
    Ok(())
}

/// List shots, most recent first, optionally filtered.
pub async fn list(ctx: &CliContext, bean: Option<i64>, min_rating: Option<u8>) -> Result<()> {
    let records = ctx.records().await?;
    let shots = match (bean, min_rating) {
        (Some(bean_id), min) => {
            let shots = records
                .list_shots_for_bean(bean_id)
                .await
                .map_err(CliError::from)?;
            let min = min.unwrap_or(0);
            shots.into_iter().filter(|s| s.rating >= min).collect()
        }
        (None, Some(min)) => records
            .list_shots_rated_at_least(min)
            .await
            .map_err(CliError::from)?,
        (None, None) => records.list_shots().await.map_err(CliError::from)?,
    };

    if shots.is_empty() {
        println!("No shots found.");
        return Ok(());
    }

    print_table(&shots);
    Ok(())
}

fn print_table(shots: &[Shot]) {
    println!(
        "{:<5} {:<17} {:<5} {:<13} {:<6} {:<6} {:<5} {:<6} {:<7} {:<24} Notes",
        "ID", "Date", "Bean", "Grind (o/i)", "Dose", "Yield", "Time", "Ratio", "Rating", "Tags"
    );
    print_separator(120);

    for shot in shots {
        let marker = if shot.is_high_rated() { "*" } else { "" };
        println!(
            "{:<5} {:<17} {:<5} {:<13} {:<6} {:<6} {:<5} {:<6} {:<7} {:<24} {}",
            shot.id,
            shot.timestamp
                .with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
                .to_string(),
            shot.bean_id,
            format!("{}/{}", shot.grind_setting_outside, shot.grind_setting_inside),
            shot.dose_in,
            shot.yield_out,
            shot.extraction_time,
            shot.brew_ratio,
            format!("{}{marker}", rating_label(shot.rating)),
            truncate_string(&format_tags(&shot.tags), 23),
            shot.notes.as_deref().unwrap_or("")
        );
    }
}

fn rating_label(rating: u8) -> String {
    if rating == 0 {
        "--".to_string()
    } else {
        format!("{rating}/5")
    }
}

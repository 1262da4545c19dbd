//! Stats command handler.
//!
//! Loads every shot, runs the analytics and prints a summary, the sweet
//! spot and a per-bean table.

use std::collections::HashMap;

use anyhow::Result;

use barista_core::analytics::{self, ShotAnalytics};
use barista_core::{Bean, UNKNOWN_BEAN};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{format_optional, print_separator, truncate_string};

/// Execute the stats command.
pub async fn execute(ctx: &CliContext, json: bool) -> Result<()> {
    let records = ctx.records().await?;
    let shots = records.list_shots().await.map_err(CliError::from)?;
    let summary = analytics::compute(&shots);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let Some(summary) = summary else {
        println!("No shots recorded yet.");
        return Ok(());
    };

    let beans = records.list_beans().await.map_err(CliError::from)?;
    print_summary(&summary);
    print_per_bean(&summary, &beans);
    Ok(())
}

fn print_summary(summary: &ShotAnalytics) {
    println!("Total shots:         {}", summary.total_shots);
    println!("Average extraction:  {}s", summary.avg_extraction);
    println!("High-rated shots:    {}", summary.high_rated.len());
    println!();

    match &summary.sweet_spot {
        Some(spot) => {
            println!("Sweet spot (from shots rated 4+):");
            println!(
                "  Grind {}/{}, {}g ground, {}g dose, {}s",
                spot.avg_grind_outside,
                spot.avg_grind_inside,
                spot.avg_grind_amount,
                spot.avg_dose,
                spot.avg_time
            );
        }
        None => println!("No sweet spot yet: rate a shot 4 or higher."),
    }
    println!();
}

fn print_per_bean(summary: &ShotAnalytics, beans: &[Bean]) {
    let labels: HashMap<i64, String> = beans.iter().map(|b| (b.id, b.label())).collect();

    println!("{:<5} {:<36} {:<7} {:<10} Avg rating", "ID", "Bean", "Shots", "Avg time");
    print_separator(72);
    for (bean_id, stats) in &summary.per_bean {
        let label = labels.get(bean_id).map_or(UNKNOWN_BEAN, String::as_str);
        println!(
            "{:<5} {:<36} {:<7} {:<10} {}",
            bean_id,
            truncate_string(label, 35),
            stats.count,
            format!("{}s", stats.average_extraction()),
            format_optional(stats.average_rating(), "--")
        );
    }
}

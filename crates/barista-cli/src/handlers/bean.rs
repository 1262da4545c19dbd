//! Bean command handlers.

use anyhow::Result;

use barista_core::BeanInput;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{print_separator, truncate_string};

/// Add a bean and print its id.
pub async fn add(ctx: &CliContext, name: String, roaster: String) -> Result<()> {
    let records = ctx.records().await?;
    let bean = records
        .add_bean(BeanInput::new(name, roaster))
        .await
        .map_err(CliError::from)?;

    println!("Added bean {} (ID: {})", bean.label(), bean.id);
    Ok(())
}

/// List every bean.
pub async fn list(ctx: &CliContext) -> Result<()> {
    let records = ctx.records().await?;
    let beans = records.list_beans().await.map_err(CliError::from)?;

    if beans.is_empty() {
        println!("No beans recorded yet.");
        println!("Use 'barista bean add --name <name> --roaster <roaster>' to add one.");
        return Ok(());
    }

    println!("{:<5} {:<30} Roaster", "ID", "Name");
    print_separator(60);
    for bean in beans {
        println!(
            "{:<5} {:<30} {}",
            bean.id,
            truncate_string(&bean.name, 29),
            bean.roaster
        );
    }

    Ok(())
}

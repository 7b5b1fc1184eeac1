//
//  pantry-cli
//  cli/category.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Category commands

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::api::{CategoryFilter, NewCategory};
use crate::context::AppContext;
use crate::interactive::prompt_confirm_with_default;

use super::{GlobalOptions, PageArgs};

#[derive(Args, Debug)]
pub struct CategoryCommand {
    #[command(subcommand)]
    pub command: CategorySubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CategorySubcommand {
    /// List categories
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Create a category
    Create(CreateArgs),

    /// Delete a category
    #[command(visible_alias = "rm")]
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[arg(long, short = 's')]
    pub search: Option<String>,

    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    pub name: String,

    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Display color, e.g. "#4caf50"
    #[arg(long)]
    pub color: Option<String>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    pub id: u64,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

impl CategoryCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let ctx = AppContext::resolve(global)?;
        ctx.require_auth()?;

        match &self.command {
            CategorySubcommand::List(args) => {
                let filter = CategoryFilter {
                    search: args.search.clone(),
                    list: args.page.to_params(),
                };
                let categories = ctx
                    .client
                    .get_categories(&filter)
                    .await
                    .context("Failed to list categories")?;
                ctx.output.write(categories.as_slice())
            }
            CategorySubcommand::Create(args) => {
                let category = ctx
                    .client
                    .create_category(&NewCategory {
                        name: args.name.clone(),
                        description: args.description.clone(),
                        color: args.color.clone(),
                    })
                    .await
                    .context("Failed to create category")?;
                if ctx.output.is_json() {
                    return ctx.output.write(&category);
                }
                ctx.output.write_success(&format!(
                    "Created category {} ({})",
                    category.name, category.id
                ));
                Ok(())
            }
            CategorySubcommand::Delete(args) => {
                if !args.yes
                    && !prompt_confirm_with_default(&format!("Delete category {}?", args.id), false)?
                {
                    ctx.output.write_info("Cancelled");
                    return Ok(());
                }
                ctx.client
                    .delete_category(args.id)
                    .await
                    .with_context(|| format!("Failed to delete category {}", args.id))?;
                ctx.output
                    .write_success(&format!("Deleted category {}", args.id));
                Ok(())
            }
        }
    }
}

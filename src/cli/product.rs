//
//  pantry-cli
//  cli/product.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Product commands

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::api::{NewProduct, ProductFilter};
use crate::context::AppContext;
use crate::interactive::prompt_confirm_with_default;

use super::{GlobalOptions, PageArgs};

#[derive(Args, Debug)]
pub struct ProductCommand {
    #[command(subcommand)]
    pub command: ProductSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ProductSubcommand {
    /// List products
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Show one product
    View(ViewArgs),

    /// Create a product
    Create(CreateArgs),

    /// Delete a product
    #[command(visible_alias = "rm")]
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only products whose name matches
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Only products in this category
    #[arg(long, short = 'c')]
    pub category: Option<u64>,

    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    pub id: u64,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    pub name: String,

    #[arg(long, short = 'd')]
    pub description: Option<String>,

    #[arg(long, short = 'c')]
    pub category: Option<u64>,

    #[arg(long)]
    pub barcode: Option<String>,

    /// Default unit, e.g. kg or l
    #[arg(long, short = 'u')]
    pub unit: Option<String>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    pub id: u64,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

impl ProductCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let ctx = AppContext::resolve(global)?;
        ctx.require_auth()?;

        match &self.command {
            ProductSubcommand::List(args) => list(&ctx, args).await,
            ProductSubcommand::View(args) => view(&ctx, args).await,
            ProductSubcommand::Create(args) => create(&ctx, args).await,
            ProductSubcommand::Delete(args) => delete(&ctx, args).await,
        }
    }
}

async fn list(ctx: &AppContext, args: &ListArgs) -> Result<()> {
    let filter = ProductFilter {
        search: args.search.clone(),
        category_id: args.category,
        list: args.page.to_params(),
    };
    let products = ctx
        .client
        .get_products(&filter)
        .await
        .context("Failed to list products")?;
    ctx.output.write(products.as_slice())
}

async fn view(ctx: &AppContext, args: &ViewArgs) -> Result<()> {
    let product = ctx
        .client
        .get_product(args.id)
        .await
        .with_context(|| format!("Failed to load product {}", args.id))?;
    ctx.output.write(&product)
}

async fn create(ctx: &AppContext, args: &CreateArgs) -> Result<()> {
    let product = ctx
        .client
        .create_product(&NewProduct {
            name: args.name.clone(),
            description: args.description.clone(),
            category_id: args.category,
            barcode: args.barcode.clone(),
            unit: args.unit.clone(),
        })
        .await
        .context("Failed to create product")?;

    if ctx.output.is_json() {
        return ctx.output.write(&product);
    }
    ctx.output
        .write_success(&format!("Created product {} ({})", product.name, product.id));
    Ok(())
}

async fn delete(ctx: &AppContext, args: &DeleteArgs) -> Result<()> {
    if !args.yes
        && !prompt_confirm_with_default(&format!("Delete product {}?", args.id), false)?
    {
        ctx.output.write_info("Cancelled");
        return Ok(());
    }

    ctx.client
        .delete_product(args.id)
        .await
        .with_context(|| format!("Failed to delete product {}", args.id))?;
    ctx.output
        .write_success(&format!("Deleted product {}", args.id));
    Ok(())
}

//
//  pantry-cli
//  cli/pantry.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pantry commands
//!
//! Pantries themselves, the items they hold, and who they are shared with.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::api::{
    NewPantry, NewPantryItem, PantryFilter, PantryItemChanges, PantryItemFilter, ShareRequest,
};
use crate::context::AppContext;
use crate::interactive::prompt_confirm_with_default;

use super::{GlobalOptions, PageArgs};

#[derive(Args, Debug)]
pub struct PantryCommand {
    #[command(subcommand)]
    pub command: PantrySubcommand,
}

#[derive(Subcommand, Debug)]
pub enum PantrySubcommand {
    /// List your pantries
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Show one pantry
    View(IdArgs),

    /// Create a pantry
    Create(CreateArgs),

    /// Delete a pantry and everything in it
    #[command(visible_alias = "rm")]
    Delete(DeleteArgs),

    /// Give another user access to a pantry
    Share(ShareArgs),

    /// Take away a user's access to a pantry
    Unshare(UnshareArgs),

    /// List the users a pantry is shared with
    Members(IdArgs),

    /// List the items in a pantry
    Items(ItemsArgs),

    /// Put a product into a pantry
    AddItem(AddItemArgs),

    /// Change the quantity, expiry or notes of an item
    UpdateItem(UpdateItemArgs),

    /// Take an item out of a pantry
    RemoveItem(RemoveItemArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Only pantries shared with you
    #[arg(long)]
    pub shared: bool,

    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Args, Debug)]
pub struct IdArgs {
    /// Pantry ID
    pub id: u64,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    pub name: String,

    #[arg(long, short = 'd')]
    pub description: Option<String>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Pantry ID
    pub id: u64,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Args, Debug)]
pub struct ShareArgs {
    /// Pantry ID
    pub id: u64,

    /// Email of the user to share with
    pub email: String,

    /// Access level, e.g. viewer or editor
    #[arg(long, short = 'p')]
    pub permission: Option<String>,
}

#[derive(Args, Debug)]
pub struct UnshareArgs {
    /// Pantry ID
    pub id: u64,

    /// ID of the user to remove
    pub user_id: u64,
}

#[derive(Args, Debug)]
pub struct ItemsArgs {
    /// Pantry ID
    pub id: u64,

    #[arg(long, short = 's')]
    pub search: Option<String>,

    #[arg(long, short = 'c')]
    pub category: Option<u64>,

    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Args, Debug)]
pub struct AddItemArgs {
    /// Pantry ID
    pub id: u64,

    /// Product ID
    pub product: u64,

    #[arg(long, short = 'q', default_value_t = 1.0)]
    pub quantity: f64,

    #[arg(long, short = 'u')]
    pub unit: Option<String>,

    /// Expiration date, e.g. 2026-12-31
    #[arg(long, short = 'x')]
    pub expires: Option<String>,

    #[arg(long, short = 'n')]
    pub notes: Option<String>,
}

#[derive(Args, Debug)]
pub struct UpdateItemArgs {
    /// Pantry ID
    pub id: u64,

    /// Item ID
    pub item: u64,

    #[arg(long, short = 'q')]
    pub quantity: Option<f64>,

    #[arg(long, short = 'u')]
    pub unit: Option<String>,

    #[arg(long, short = 'x')]
    pub expires: Option<String>,

    #[arg(long, short = 'n')]
    pub notes: Option<String>,
}

#[derive(Args, Debug)]
pub struct RemoveItemArgs {
    /// Pantry ID
    pub id: u64,

    /// Item IDs
    #[arg(required = true, num_args = 1..)]
    pub items: Vec<u64>,
}

impl PantryCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let ctx = AppContext::resolve(global)?;
        ctx.require_auth()?;

        match &self.command {
            PantrySubcommand::List(args) => list(&ctx, args).await,
            PantrySubcommand::View(args) => view(&ctx, args).await,
            PantrySubcommand::Create(args) => create(&ctx, args).await,
            PantrySubcommand::Delete(args) => delete(&ctx, args).await,
            PantrySubcommand::Share(args) => share(&ctx, args).await,
            PantrySubcommand::Unshare(args) => unshare(&ctx, args).await,
            PantrySubcommand::Members(args) => members(&ctx, args).await,
            PantrySubcommand::Items(args) => items(&ctx, args).await,
            PantrySubcommand::AddItem(args) => add_item(&ctx, args).await,
            PantrySubcommand::UpdateItem(args) => update_item(&ctx, args).await,
            PantrySubcommand::RemoveItem(args) => remove_items(&ctx, args).await,
        }
    }
}

async fn list(ctx: &AppContext, args: &ListArgs) -> Result<()> {
    let filter = PantryFilter {
        search: args.search.clone(),
        shared: args.shared.then_some(true),
        list: args.page.to_params(),
    };
    let pantries = ctx
        .client
        .get_pantries(&filter)
        .await
        .context("Failed to list pantries")?;
    ctx.output.write(&pantries)
}

async fn view(ctx: &AppContext, args: &IdArgs) -> Result<()> {
    let pantry = ctx
        .client
        .get_pantry(args.id)
        .await
        .with_context(|| format!("Failed to load pantry {}", args.id))?;
    ctx.output.write(&pantry)
}

async fn create(ctx: &AppContext, args: &CreateArgs) -> Result<()> {
    let pantry = ctx
        .client
        .create_pantry(&NewPantry {
            name: args.name.clone(),
            description: args.description.clone(),
        })
        .await
        .context("Failed to create pantry")?;

    if ctx.output.is_json() {
        return ctx.output.write(&pantry);
    }
    ctx.output
        .write_success(&format!("Created pantry {} ({})", pantry.name, pantry.id));
    Ok(())
}

async fn delete(ctx: &AppContext, args: &DeleteArgs) -> Result<()> {
    if !args.yes
        && !prompt_confirm_with_default(
            &format!("Delete pantry {} and all of its items?", args.id),
            false,
        )?
    {
        ctx.output.write_info("Cancelled");
        return Ok(());
    }

    ctx.client
        .delete_pantry(args.id)
        .await
        .with_context(|| format!("Failed to delete pantry {}", args.id))?;
    ctx.output
        .write_success(&format!("Deleted pantry {}", args.id));
    Ok(())
}

async fn share(ctx: &AppContext, args: &ShareArgs) -> Result<()> {
    let mut request = ShareRequest::new(args.email.trim());
    if let Some(permission) = &args.permission {
        request = request.with_permission(permission.as_str());
    }

    let ack = ctx
        .client
        .share_pantry(args.id, &request)
        .await
        .with_context(|| format!("Failed to share pantry {}", args.id))?;

    if ctx.output.is_json() {
        return ctx.output.write(&ack);
    }
    ctx.output
        .write_success(&format!("Shared pantry {} with {}", args.id, request.email));
    Ok(())
}

async fn unshare(ctx: &AppContext, args: &UnshareArgs) -> Result<()> {
    let ack = ctx
        .client
        .revoke_pantry_share(args.id, args.user_id)
        .await
        .with_context(|| format!("Failed to revoke access to pantry {}", args.id))?;

    if ctx.output.is_json() {
        return ctx.output.write(&ack);
    }
    ctx.output.write_success(&format!(
        "Removed user {} from pantry {}",
        args.user_id, args.id
    ));
    Ok(())
}

async fn members(ctx: &AppContext, args: &IdArgs) -> Result<()> {
    let users = ctx
        .client
        .get_pantry_shared_users(args.id)
        .await
        .with_context(|| format!("Failed to list members of pantry {}", args.id))?;
    ctx.output.write(users.as_slice())
}

async fn items(ctx: &AppContext, args: &ItemsArgs) -> Result<()> {
    let filter = PantryItemFilter {
        search: args.search.clone(),
        category_id: args.category,
        list: args.page.to_params(),
    };
    let items = ctx
        .client
        .get_pantry_items(args.id, &filter)
        .await
        .with_context(|| format!("Failed to list items in pantry {}", args.id))?;
    ctx.output.write(items.as_slice())
}

async fn add_item(ctx: &AppContext, args: &AddItemArgs) -> Result<()> {
    let item = ctx
        .client
        .add_pantry_item(
            args.id,
            &NewPantryItem {
                product_id: args.product,
                quantity: args.quantity,
                unit: args.unit.clone(),
                expiration_date: args.expires.clone(),
                notes: args.notes.clone(),
            },
        )
        .await
        .with_context(|| format!("Failed to add product {} to pantry {}", args.product, args.id))?;

    if ctx.output.is_json() {
        return ctx.output.write(&item);
    }
    ctx.output.write_success(&format!(
        "Added {} to pantry {} (item {})",
        item.label(),
        args.id,
        item.id
    ));
    Ok(())
}

async fn update_item(ctx: &AppContext, args: &UpdateItemArgs) -> Result<()> {
    let changes = PantryItemChanges {
        quantity: args.quantity,
        unit: args.unit.clone(),
        expiration_date: args.expires.clone(),
        notes: args.notes.clone(),
    };
    if changes.quantity.is_none()
        && changes.unit.is_none()
        && changes.expiration_date.is_none()
        && changes.notes.is_none()
    {
        anyhow::bail!("Nothing to update; pass --quantity, --unit, --expires or --notes");
    }

    let item = ctx
        .client
        .update_pantry_item(args.id, args.item, &changes)
        .await
        .with_context(|| format!("Failed to update item {} in pantry {}", args.item, args.id))?;
    ctx.output.write(&item)
}

/// Removes several items, continuing past failures.
async fn remove_items(ctx: &AppContext, args: &RemoveItemArgs) -> Result<()> {
    let mut failures = 0;
    for &item in &args.items {
        match ctx.client.delete_pantry_item(args.id, item).await {
            Ok(()) => ctx
                .output
                .write_success(&format!("Removed item {} from pantry {}", item, args.id)),
            Err(e) => {
                failures += 1;
                ctx.output
                    .write_error(&format!("Could not remove item {}: {}", item, e));
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} items could not be removed", failures, args.items.len());
    }
    Ok(())
}

//
//  pantry-cli
//  cli/list.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Shopping list commands

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::api::{Acknowledgement, NewListItem, NewShoppingList, ShareRequest, ShoppingListFilter};
use crate::context::AppContext;
use crate::interactive::prompt_confirm_with_default;

use super::{GlobalOptions, PageArgs};

#[derive(Args, Debug)]
pub struct ListCommand {
    #[command(subcommand)]
    pub command: ListSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ListSubcommand {
    /// List your shopping lists
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Show a shopping list and its items
    View(IdArgs),

    /// Create a shopping list
    Create(CreateArgs),

    /// Delete a shopping list
    #[command(visible_alias = "rm")]
    Delete(DeleteArgs),

    /// Mark every item on a list as purchased
    Purchase(IdArgs),

    /// Clear the purchased flag on every item
    Reset(IdArgs),

    /// Move the purchased items into a pantry
    Move(MoveArgs),

    /// Give another user access to a list
    Share(ShareArgs),

    /// Take away a user's access to a list
    Unshare(UnshareArgs),

    /// List the users a list is shared with
    Members(IdArgs),

    /// List the items on a list
    Items(IdArgs),

    /// Add an item to a list
    AddItem(AddItemArgs),

    /// Mark an item as purchased (or not, with --undo)
    Check(CheckArgs),

    /// Remove items from a list
    RemoveItem(RemoveItemArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Only lists with this status, e.g. active or completed
    #[arg(long)]
    pub status: Option<String>,

    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Args, Debug)]
pub struct IdArgs {
    /// Shopping list ID
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
    /// Shopping list ID
    pub id: u64,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Args, Debug)]
pub struct MoveArgs {
    /// Shopping list ID
    pub id: u64,

    /// Destination pantry ID
    #[arg(long, short = 'p')]
    pub pantry: u64,
}

#[derive(Args, Debug)]
pub struct ShareArgs {
    /// Shopping list ID
    pub id: u64,

    /// Email of the user to share with
    pub email: String,

    /// Access level, e.g. viewer or editor
    #[arg(long, short = 'p')]
    pub permission: Option<String>,
}

#[derive(Args, Debug)]
pub struct UnshareArgs {
    /// Shopping list ID
    pub id: u64,

    /// ID of the user to remove
    pub user_id: u64,
}

#[derive(Args, Debug)]
#[command(group = clap::ArgGroup::new("what").required(true).args(["product", "name"]))]
pub struct AddItemArgs {
    /// Shopping list ID
    pub id: u64,

    /// Product ID
    #[arg(long)]
    pub product: Option<u64>,

    /// Free-text item name
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long, short = 'q', default_value_t = 1.0)]
    pub quantity: f64,

    #[arg(long, short = 'u')]
    pub unit: Option<String>,

    #[arg(long, short = 'n')]
    pub notes: Option<String>,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Shopping list ID
    pub id: u64,

    /// Item ID
    pub item: u64,

    /// Mark as not purchased
    #[arg(long)]
    pub undo: bool,
}

#[derive(Args, Debug)]
pub struct RemoveItemArgs {
    /// Shopping list ID
    pub id: u64,

    /// Item IDs
    #[arg(required = true, num_args = 1..)]
    pub items: Vec<u64>,
}

impl ListCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let ctx = AppContext::resolve(global)?;
        ctx.require_auth()?;

        match &self.command {
            ListSubcommand::List(args) => list(&ctx, args).await,
            ListSubcommand::View(args) => view(&ctx, args).await,
            ListSubcommand::Create(args) => create(&ctx, args).await,
            ListSubcommand::Delete(args) => delete(&ctx, args).await,
            ListSubcommand::Purchase(args) => {
                let ack = ctx
                    .client
                    .purchase_shopping_list(args.id)
                    .await
                    .with_context(|| format!("Failed to purchase list {}", args.id))?;
                report(&ctx, &ack, &format!("Marked list {} as purchased", args.id))
            }
            ListSubcommand::Reset(args) => {
                let ack = ctx
                    .client
                    .reset_shopping_list(args.id)
                    .await
                    .with_context(|| format!("Failed to reset list {}", args.id))?;
                report(&ctx, &ack, &format!("Reset list {}", args.id))
            }
            ListSubcommand::Move(args) => {
                let ack = ctx
                    .client
                    .move_shopping_list_to_pantry(args.id, args.pantry)
                    .await
                    .with_context(|| {
                        format!("Failed to move list {} into pantry {}", args.id, args.pantry)
                    })?;
                report(
                    &ctx,
                    &ack,
                    &format!("Moved purchased items of list {} into pantry {}", args.id, args.pantry),
                )
            }
            ListSubcommand::Share(args) => share(&ctx, args).await,
            ListSubcommand::Unshare(args) => {
                let ack = ctx
                    .client
                    .revoke_shopping_list_share(args.id, args.user_id)
                    .await
                    .with_context(|| format!("Failed to revoke access to list {}", args.id))?;
                report(
                    &ctx,
                    &ack,
                    &format!("Removed user {} from list {}", args.user_id, args.id),
                )
            }
            ListSubcommand::Members(args) => {
                let users = ctx
                    .client
                    .get_shopping_list_shared_users(args.id)
                    .await
                    .with_context(|| format!("Failed to list members of list {}", args.id))?;
                ctx.output.write(users.as_slice())
            }
            ListSubcommand::Items(args) => {
                let items = ctx
                    .client
                    .get_list_items(args.id)
                    .await
                    .with_context(|| format!("Failed to list items on list {}", args.id))?;
                ctx.output.write(items.as_slice())
            }
            ListSubcommand::AddItem(args) => add_item(&ctx, args).await,
            ListSubcommand::Check(args) => {
                let item = ctx
                    .client
                    .set_list_item_purchased(args.id, args.item, !args.undo)
                    .await
                    .with_context(|| format!("Failed to update item {}", args.item))?;
                ctx.output.write(&item)
            }
            ListSubcommand::RemoveItem(args) => remove_items(&ctx, args).await,
        }
    }
}

/// Prints an action's acknowledgement, or `fallback` when the server sent no message.
fn report(ctx: &AppContext, ack: &Acknowledgement, fallback: &str) -> Result<()> {
    if ctx.output.is_json() {
        return ctx.output.write(ack);
    }
    ctx.output
        .write_success(ack.message.as_deref().unwrap_or(fallback));
    Ok(())
}

async fn list(ctx: &AppContext, args: &ListArgs) -> Result<()> {
    let filter = ShoppingListFilter {
        search: args.search.clone(),
        status: args.status.clone(),
        list: args.page.to_params(),
    };
    let lists = ctx
        .client
        .get_shopping_lists(&filter)
        .await
        .context("Failed to list shopping lists")?;
    ctx.output.write(&lists)
}

async fn view(ctx: &AppContext, args: &IdArgs) -> Result<()> {
    let (list, items) = tokio::try_join!(
        ctx.client.get_shopping_list(args.id),
        ctx.client.get_list_items(args.id)
    )
    .with_context(|| format!("Failed to load list {}", args.id))?;

    if ctx.output.is_json() {
        let result = serde_json::json!({
            "list": list,
            "items": items,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    ctx.output.write(&list)?;
    println!();
    ctx.output.write(items.as_slice())
}

async fn create(ctx: &AppContext, args: &CreateArgs) -> Result<()> {
    let list = ctx
        .client
        .create_shopping_list(&NewShoppingList {
            name: args.name.clone(),
            description: args.description.clone(),
        })
        .await
        .context("Failed to create shopping list")?;

    if ctx.output.is_json() {
        return ctx.output.write(&list);
    }
    ctx.output
        .write_success(&format!("Created list {} ({})", list.name, list.id));
    Ok(())
}

async fn delete(ctx: &AppContext, args: &DeleteArgs) -> Result<()> {
    if !args.yes
        && !prompt_confirm_with_default(&format!("Delete shopping list {}?", args.id), false)?
    {
        ctx.output.write_info("Cancelled");
        return Ok(());
    }

    ctx.client
        .delete_shopping_list(args.id)
        .await
        .with_context(|| format!("Failed to delete list {}", args.id))?;
    ctx.output
        .write_success(&format!("Deleted list {}", args.id));
    Ok(())
}

async fn share(ctx: &AppContext, args: &ShareArgs) -> Result<()> {
    let mut request = ShareRequest::new(args.email.trim());
    if let Some(permission) = &args.permission {
        request = request.with_permission(permission.as_str());
    }

    let ack = ctx
        .client
        .share_shopping_list(args.id, &request)
        .await
        .with_context(|| format!("Failed to share list {}", args.id))?;
    report(
        ctx,
        &ack,
        &format!("Shared list {} with {}", args.id, request.email),
    )
}

async fn add_item(ctx: &AppContext, args: &AddItemArgs) -> Result<()> {
    let item = ctx
        .client
        .add_list_item(
            args.id,
            &NewListItem {
                product_id: args.product,
                name: args.name.clone(),
                quantity: args.quantity,
                unit: args.unit.clone(),
                notes: args.notes.clone(),
            },
        )
        .await
        .with_context(|| format!("Failed to add an item to list {}", args.id))?;

    if ctx.output.is_json() {
        return ctx.output.write(&item);
    }
    ctx.output.write_success(&format!(
        "Added {} to list {} (item {})",
        item.label(),
        args.id,
        item.id
    ));
    Ok(())
}

/// Removes several items, continuing past failures.
async fn remove_items(ctx: &AppContext, args: &RemoveItemArgs) -> Result<()> {
    let mut failures = 0;
    for &item in &args.items {
        match ctx.client.delete_list_item(args.id, item).await {
            Ok(()) => ctx
                .output
                .write_success(&format!("Removed item {} from list {}", item, args.id)),
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

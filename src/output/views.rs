//
//  pantry-cli
//  output/views.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use super::{
    format_bool, format_quantity, format_status, print_field, print_header, print_optional_field,
    truncate, TableBuilder, TableOutput,
};
use crate::api::{
    Acknowledgement, Category, ListItem, Paginated, Pantry, PantryItem, Product, SharedUser,
    ShoppingList, User,
};

const NAME_WIDTH: usize = 40;

fn id_or_dash(id: Option<u64>) -> String {
    id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string())
}

fn print_page_footer<T>(page: &Paginated<T>) {
    match (page.total(), page.page()) {
        (Some(total), Some(number)) => println!("Page {}, {} of {} total", number, page.len(), total),
        (Some(total), None) => println!("Showing {} of {}", page.len(), total),
        _ => {}
    }
}

impl TableOutput for [Product] {
    fn print_table(&self, color: bool) {
        if self.is_empty() {
            println!("No products found");
            return;
        }
        let mut table = TableBuilder::new()
            .color(color)
            .headers(["ID", "NAME", "CATEGORY", "UNIT"]);
        for product in self {
            table = table.row([
                product.id.to_string(),
                truncate(&product.name, NAME_WIDTH),
                id_or_dash(product.category_id),
                product.unit.clone().unwrap_or_default(),
            ]);
        }
        table.print();
    }
}

impl TableOutput for Product {
    fn print_table(&self, color: bool) {
        print_header(&self.name);
        print_field("ID", &self.id.to_string(), color);
        print_optional_field("Description", self.description.as_deref(), color);
        print_optional_field("Category", self.category_id.map(|id| id.to_string()).as_deref(), color);
        print_optional_field("Barcode", self.barcode.as_deref(), color);
        print_optional_field("Unit", self.unit.as_deref(), color);
    }
}

impl TableOutput for [Category] {
    fn print_table(&self, color: bool) {
        if self.is_empty() {
            println!("No categories found");
            return;
        }
        let mut table = TableBuilder::new()
            .color(color)
            .headers(["ID", "NAME", "DESCRIPTION"]);
        for category in self {
            table = table.row([
                category.id.to_string(),
                truncate(&category.name, NAME_WIDTH),
                truncate(category.description.as_deref().unwrap_or(""), NAME_WIDTH),
            ]);
        }
        table.print();
    }
}

impl TableOutput for Category {
    fn print_table(&self, color: bool) {
        print_header(&self.name);
        print_field("ID", &self.id.to_string(), color);
        print_optional_field("Description", self.description.as_deref(), color);
        print_optional_field("Color", self.color.as_deref(), color);
    }
}

impl TableOutput for Paginated<Pantry> {
    fn print_table(&self, color: bool) {
        if self.is_empty() {
            println!("No pantries found");
            return;
        }
        let mut table = TableBuilder::new()
            .color(color)
            .headers(["ID", "NAME", "ITEMS", "DESCRIPTION"]);
        for pantry in self {
            table = table.row([
                pantry.id.to_string(),
                truncate(&pantry.name, NAME_WIDTH),
                id_or_dash(pantry.item_count),
                truncate(pantry.description.as_deref().unwrap_or(""), NAME_WIDTH),
            ]);
        }
        table.print();
        print_page_footer(self);
    }
}

impl TableOutput for Pantry {
    fn print_table(&self, color: bool) {
        print_header(&self.name);
        print_field("ID", &self.id.to_string(), color);
        print_optional_field("Description", self.description.as_deref(), color);
        print_optional_field("Owner", self.owner_id.map(|id| id.to_string()).as_deref(), color);
        print_optional_field("Items", self.item_count.map(|n| n.to_string()).as_deref(), color);
    }
}

impl TableOutput for [PantryItem] {
    fn print_table(&self, color: bool) {
        if self.is_empty() {
            println!("This pantry is empty");
            return;
        }
        let mut table = TableBuilder::new()
            .color(color)
            .headers(["ID", "PRODUCT", "QUANTITY", "EXPIRES"]);
        for item in self {
            table = table.row([
                item.id.to_string(),
                truncate(&item.label(), NAME_WIDTH),
                format_quantity(item.quantity, item.unit.as_deref()),
                item.expiration_date.clone().unwrap_or_else(|| "-".to_string()),
            ]);
        }
        table.print();
    }
}

impl TableOutput for PantryItem {
    fn print_table(&self, color: bool) {
        print_header(&self.label());
        print_field("ID", &self.id.to_string(), color);
        print_field("Quantity", &format_quantity(self.quantity, self.unit.as_deref()), color);
        print_optional_field("Expires", self.expiration_date.as_deref(), color);
        print_optional_field("Notes", self.notes.as_deref(), color);
    }
}

impl TableOutput for Paginated<ShoppingList> {
    fn print_table(&self, color: bool) {
        if self.is_empty() {
            println!("No shopping lists found");
            return;
        }
        let mut table = TableBuilder::new()
            .color(color)
            .headers(["ID", "NAME", "STATUS", "ITEMS"]);
        for list in self {
            table = table.row([
                list.id.to_string(),
                truncate(&list.name, NAME_WIDTH),
                format_status(list.status.as_deref().unwrap_or("-"), color),
                id_or_dash(list.item_count),
            ]);
        }
        table.print();
        print_page_footer(self);
    }
}

impl TableOutput for ShoppingList {
    fn print_table(&self, color: bool) {
        print_header(&self.name);
        print_field("ID", &self.id.to_string(), color);
        print_optional_field("Description", self.description.as_deref(), color);
        if let Some(status) = &self.status {
            print_field("Status", &format_status(status, color), color);
        }
        print_optional_field("Items", self.item_count.map(|n| n.to_string()).as_deref(), color);
    }
}

impl TableOutput for [ListItem] {
    fn print_table(&self, color: bool) {
        if self.is_empty() {
            println!("This list is empty");
            return;
        }
        let mut table = TableBuilder::new()
            .color(color)
            .headers(["ID", "ITEM", "QUANTITY", "PURCHASED"]);
        for item in self {
            table = table.row([
                item.id.to_string(),
                truncate(&item.label(), NAME_WIDTH),
                format_quantity(item.quantity, item.unit.as_deref()),
                format_bool(item.purchased, color),
            ]);
        }
        table.print();
    }
}

impl TableOutput for ListItem {
    fn print_table(&self, color: bool) {
        print_header(&self.label());
        print_field("ID", &self.id.to_string(), color);
        print_field("Quantity", &format_quantity(self.quantity, self.unit.as_deref()), color);
        print_field("Purchased", &format_bool(self.purchased, color), color);
        print_optional_field("Notes", self.notes.as_deref(), color);
    }
}

impl TableOutput for [SharedUser] {
    fn print_table(&self, color: bool) {
        if self.is_empty() {
            println!("Not shared with anyone");
            return;
        }
        let mut table = TableBuilder::new()
            .color(color)
            .headers(["USER ID", "EMAIL", "NAME", "PERMISSION"]);
        for user in self {
            table = table.row([
                user.id.to_string(),
                user.email.clone().unwrap_or_default(),
                user.name.clone().unwrap_or_default(),
                user.permission.clone().unwrap_or_else(|| "-".to_string()),
            ]);
        }
        table.print();
    }
}

impl TableOutput for User {
    fn print_table(&self, color: bool) {
        print_header(&self.display_name());
        print_optional_field("ID", self.id.as_ref().map(|id| id.to_string()).as_deref(), color);
        print_optional_field("Email", self.email.as_deref(), color);
        print_optional_field("Name", self.name.as_deref(), color);
        print_optional_field("Surname", self.surname.as_deref(), color);
    }
}

impl TableOutput for Acknowledgement {
    fn print_table(&self, _color: bool) {
        println!("{}", self.message.as_deref().unwrap_or("Done"));
    }
}

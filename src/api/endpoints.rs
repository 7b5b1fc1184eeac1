//
//  pantry-cli
//  api/endpoints.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Endpoint table.
//!
//! Fixed paths for every resource family, relative to the API base URL.
//! Paths that embed identifiers are built by the functions below.

pub const LOGIN: &str = "/api/users/login";
pub const REGISTER: &str = "/api/users/register";
pub const VERIFY_ACCOUNT: &str = "/api/users/verify-account";
pub const PROFILE: &str = "/api/users/profile";
pub const LOGOUT: &str = "/api/users/logout";
pub const CHANGE_PASSWORD: &str = "/api/users/change-password";
pub const FORGOT_PASSWORD: &str = "/api/users/forgot-password";
pub const RESET_PASSWORD: &str = "/api/users/reset-password";

pub const PRODUCTS: &str = "/api/products";
pub const CATEGORIES: &str = "/api/categories";
pub const PANTRIES: &str = "/api/pantries";
pub const SHOPPING_LISTS: &str = "/api/shopping-lists";

pub fn product(id: u64) -> String {
    format!("{}/{}", PRODUCTS, id)
}

pub fn category(id: u64) -> String {
    format!("{}/{}", CATEGORIES, id)
}

pub fn pantry(id: u64) -> String {
    format!("{}/{}", PANTRIES, id)
}

pub fn pantry_share(id: u64) -> String {
    format!("{}/{}/share", PANTRIES, id)
}

pub fn pantry_shared_users(id: u64) -> String {
    format!("{}/{}/shared-users", PANTRIES, id)
}

pub fn pantry_share_user(id: u64, user_id: u64) -> String {
    format!("{}/{}/share/{}", PANTRIES, id, user_id)
}

pub fn pantry_items(pantry_id: u64) -> String {
    format!("{}/{}/items", PANTRIES, pantry_id)
}

pub fn pantry_item(pantry_id: u64, item_id: u64) -> String {
    format!("{}/{}/items/{}", PANTRIES, pantry_id, item_id)
}

pub fn shopping_list(id: u64) -> String {
    format!("{}/{}", SHOPPING_LISTS, id)
}

pub fn shopping_list_purchase(id: u64) -> String {
    format!("{}/{}/purchase", SHOPPING_LISTS, id)
}

pub fn shopping_list_reset(id: u64) -> String {
    format!("{}/{}/reset", SHOPPING_LISTS, id)
}

pub fn shopping_list_move_to_pantry(id: u64) -> String {
    format!("{}/{}/move-to-pantry", SHOPPING_LISTS, id)
}

pub fn shopping_list_share(id: u64) -> String {
    format!("{}/{}/share", SHOPPING_LISTS, id)
}

pub fn shopping_list_shared_users(id: u64) -> String {
    format!("{}/{}/shared-users", SHOPPING_LISTS, id)
}

pub fn shopping_list_share_user(id: u64, user_id: u64) -> String {
    format!("{}/{}/share/{}", SHOPPING_LISTS, id, user_id)
}

pub fn list_items(list_id: u64) -> String {
    format!("{}/{}/items", SHOPPING_LISTS, list_id)
}

pub fn list_item(list_id: u64, item_id: u64) -> String {
    format!("{}/{}/items/{}", SHOPPING_LISTS, list_id, item_id)
}

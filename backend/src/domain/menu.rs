//! Menu catalogue management.
//!
//! Menu prices are only a lookup default when admitting an extra; past
//! invoices are unaffected by later price edits because the admission
//! engine captures the price on each entry.

use crate::db::DbConnection;
use crate::error::AppError;
use shared::{CreateMenuItemRequest, MealSlot, MenuItem};
use tracing::info;
use uuid::Uuid;

#[derive(Clone)]
pub struct MenuService {
    db: DbConnection,
}

impl MenuService {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    pub async fn create_menu_item(&self, request: CreateMenuItemRequest) -> Result<MenuItem, AppError> {
        if request.price < 0.0 {
            return Err(AppError::validation(format!(
                "menu item price must not be negative, got {}",
                request.price
            )));
        }
        if request.name.trim().is_empty() {
            return Err(AppError::validation("menu item name must not be empty"));
        }

        let item = MenuItem {
            id: Uuid::new_v4().to_string(),
            name: request.name,
            category: request.category,
            price: request.price,
            description: request.description,
            available: request.available,
        };
        self.db.insert_menu_item(&item).await?;

        info!("Created menu item {} ({})", item.name, item.id);
        Ok(item)
    }

    pub async fn get_menu_item(&self, id: &str) -> Result<MenuItem, AppError> {
        self.db
            .get_menu_item(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Menu item {id} not found")))
    }

    pub async fn list_menu_items(&self) -> Result<Vec<MenuItem>, AppError> {
        Ok(self.db.list_menu_items().await?)
    }

    /// Available items for one meal category
    pub async fn menu_items_by_category(&self, category: MealSlot) -> Result<Vec<MenuItem>, AppError> {
        Ok(self.db.menu_items_by_category(category).await?)
    }

    pub async fn update_menu_item(&self, item: MenuItem) -> Result<MenuItem, AppError> {
        if item.price < 0.0 {
            return Err(AppError::validation(format!(
                "menu item price must not be negative, got {}",
                item.price
            )));
        }
        if !self.db.update_menu_item(&item).await? {
            return Err(AppError::not_found(format!("Menu item {} not found", item.id)));
        }
        Ok(item)
    }

    pub async fn delete_menu_item(&self, id: &str) -> Result<(), AppError> {
        if !self.db.delete_menu_item(id).await? {
            return Err(AppError::not_found(format!("Menu item {id} not found")));
        }
        info!("Deleted menu item {}", id);
        Ok(())
    }
}

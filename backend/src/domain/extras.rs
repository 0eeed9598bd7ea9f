//! Daily-extras admission.
//!
//! The one business rule here: a customer has at most one extra per
//! (date, meal slot). Admitting a second entry for an occupied slot
//! overwrites the item reference, price and note in place; the entry's
//! identity and creation time survive. There is no history of
//! overwritten extras.

use crate::db::DbConnection;
use crate::error::AppError;
use chrono::{NaiveDate, Utc};
use shared::{AdmitExtraRequest, DailyExtra, MealSlot};
use tracing::info;
use uuid::Uuid;

#[derive(Clone)]
pub struct ExtraService {
    db: DbConnection,
}

impl ExtraService {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Apply the at-most-one-per-slot rule to a proposed write and return
    /// the slot's resulting single entry.
    ///
    /// Existence of the referenced customer and menu item is the caller's
    /// responsibility; the price is captured here and stays fixed even if
    /// the menu item's price later changes.
    pub async fn admit_extra(&self, request: AdmitExtraRequest) -> Result<DailyExtra, AppError> {
        if request.price < 0.0 {
            return Err(AppError::validation(format!(
                "extra price must not be negative, got {}",
                request.price
            )));
        }

        let notes = request.notes.unwrap_or_default();
        let now = Utc::now();

        let entry = match self
            .db
            .find_extra(&request.customer_id, request.date, request.meal_slot)
            .await?
        {
            Some(existing) => {
                info!(
                    "Overwriting {} extra for customer {} on {}",
                    request.meal_slot, request.customer_id, request.date
                );
                DailyExtra {
                    menu_item_id: request.menu_item_id,
                    price: request.price,
                    notes,
                    updated_at: now,
                    ..existing
                }
            }
            None => DailyExtra {
                id: Uuid::new_v4().to_string(),
                customer_id: request.customer_id,
                date: request.date,
                meal_slot: request.meal_slot,
                menu_item_id: request.menu_item_id,
                price: request.price,
                notes,
                created_at: now,
                updated_at: now,
            },
        };

        self.db.upsert_extra(&entry).await?;
        Ok(entry)
    }

    /// The single entry for a slot, if any
    pub async fn find_extra(
        &self,
        customer_id: &str,
        date: NaiveDate,
        meal_slot: MealSlot,
    ) -> Result<Option<DailyExtra>, AppError> {
        Ok(self.db.find_extra(customer_id, date, meal_slot).await?)
    }

    /// All entries across all customers for a date. Used to render a
    /// day's activity and to surface already-filled slots in the UI.
    pub async fn extras_for_date(&self, date: NaiveDate) -> Result<Vec<DailyExtra>, AppError> {
        Ok(self.db.extras_for_date(date).await?)
    }

    /// Remove one slot's entry, or every entry for the customer and date
    /// when no slot is given. Matching nothing is not an error.
    pub async fn remove_extras(
        &self,
        customer_id: &str,
        date: NaiveDate,
        meal_slot: Option<MealSlot>,
    ) -> Result<u64, AppError> {
        let removed = self.db.delete_extras(customer_id, date, meal_slot).await?;
        info!(
            "Removed {} extra(s) for customer {} on {}",
            removed, customer_id, date
        );
        Ok(removed)
    }
}

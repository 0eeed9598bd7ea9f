//! Invoice aggregation.
//!
//! Walks a billing period, joins the customer's extras with menu-item
//! names, and derives an itemized statement with per-meal totals, the
//! subscription charge and advance deductions. The computation only
//! reads; every fetch failure aborts the whole invoice rather than
//! producing a partial one.

use crate::db::DbConnection;
use crate::domain::{calendar, display};
use crate::error::AppError;
use anyhow::anyhow;
use chrono::{Datelike, NaiveDate};
use shared::{Customer, DailyExtra, DateWiseRow, InvoiceData, InvoiceSummary, MealSlot, MenuItem, PeriodType, SubscriptionType};
use std::collections::HashMap;
use tracing::info;

#[derive(Clone)]
pub struct InvoiceService {
    db: DbConnection,
}

impl InvoiceService {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Produce the statement for one calendar month.
    ///
    /// Summation order is fixed (ascending date, then breakfast, lunch,
    /// dinner) so repeated runs over the same data are byte-identical.
    pub async fn generate_monthly_invoice(
        &self,
        customer_id: &str,
        year: i32,
        month: u32,
    ) -> Result<InvoiceData, AppError> {
        if !(1..=12).contains(&month) {
            return Err(AppError::validation(format!(
                "month must be between 1 and 12, got {month}"
            )));
        }

        let customer = self.require_customer(customer_id).await?;
        let extras = self.db.extras_for_customer_in_month(customer_id, year, month).await?;
        let menu = self.resolve_menu_items(&extras).await?;

        info!(
            "Generating monthly invoice for {} ({}/{}), {} extras",
            customer.name, month, year, extras.len()
        );

        let mut by_day: HashMap<(u32, MealSlot), Vec<DailyExtra>> = HashMap::new();
        for extra in extras {
            by_day.entry((extra.date.day(), extra.meal_slot)).or_default().push(extra);
        }

        let days_in_month = calendar::days_in_month(year, month);
        let mut rows = Vec::with_capacity(days_in_month as usize);
        let mut slot_totals: HashMap<MealSlot, f64> = HashMap::new();

        for day in 1..=days_in_month {
            let date = NaiveDate::from_ymd_opt(year, month, day)
                .ok_or_else(|| anyhow!("invalid calendar date {year}-{month:02}-{day:02}"))?;

            let mut cells: HashMap<MealSlot, String> = HashMap::new();
            for slot in MealSlot::ALL {
                let entries = by_day.get(&(day, slot)).map(Vec::as_slice).unwrap_or_default();
                let rendered: Vec<String> = entries
                    .iter()
                    .map(|extra| {
                        *slot_totals.entry(slot).or_default() += extra.price;
                        display::format_extra_display(extra, menu.get(&extra.menu_item_id))
                    })
                    .collect();
                cells.insert(slot, display::format_cell(&rendered));
            }

            rows.push(DateWiseRow {
                date,
                day: calendar::weekday_name(date).to_string(),
                breakfast: cells.remove(&MealSlot::Breakfast).unwrap_or_else(|| display::EMPTY_CELL.to_string()),
                lunch: cells.remove(&MealSlot::Lunch).unwrap_or_else(|| display::EMPTY_CELL.to_string()),
                dinner: cells.remove(&MealSlot::Dinner).unwrap_or_else(|| display::EMPTY_CELL.to_string()),
            });
        }

        let breakfast_total = slot_totals.get(&MealSlot::Breakfast).copied().unwrap_or(0.0);
        let lunch_total = slot_totals.get(&MealSlot::Lunch).copied().unwrap_or(0.0);
        let dinner_total = slot_totals.get(&MealSlot::Dinner).copied().unwrap_or(0.0);
        let extras_total = breakfast_total + lunch_total + dinner_total;

        // A monthly subscription's daily_amount is the flat monthly fee.
        let subscription_total = match customer.subscription_type {
            SubscriptionType::Monthly => customer.daily_amount,
            SubscriptionType::Daily => customer.daily_amount * days_in_month as f64,
        };

        let total_advance: f64 = self
            .db
            .advances_for_month(customer_id, year, month)
            .await?
            .iter()
            .map(|advance| advance.amount)
            .sum();

        let summary = InvoiceSummary {
            days_in_month,
            daily_amount: customer.daily_amount,
            subscription_total,
            breakfast_total,
            lunch_total,
            dinner_total,
            extras_total,
            total_advance,
            grand_total: subscription_total + extras_total - total_advance,
        };

        Ok(InvoiceData {
            customer,
            period_type: PeriodType::Monthly,
            year: Some(year),
            month: Some(month),
            month_name: Some(calendar::month_name(month).to_string()),
            date: None,
            date_wise_data: rows,
            summary,
        })
    }

    /// Produce an ad hoc statement for a single date.
    ///
    /// Monthly subscribers carry no per-day subscription charge here, and
    /// advances are monthly-only credits, so none are deducted.
    pub async fn generate_daily_invoice(
        &self,
        customer_id: &str,
        date: NaiveDate,
    ) -> Result<InvoiceData, AppError> {
        let customer = self.require_customer(customer_id).await?;

        let mut extras = Vec::new();
        for slot in MealSlot::ALL {
            if let Some(extra) = self.db.find_extra(customer_id, date, slot).await? {
                extras.push(extra);
            }
        }
        let menu = self.resolve_menu_items(&extras).await?;

        info!(
            "Generating daily invoice for {} on {}, {} extras",
            customer.name, date, extras.len()
        );

        let mut slot_totals: HashMap<MealSlot, f64> = HashMap::new();
        let mut cells: HashMap<MealSlot, String> = HashMap::new();
        for slot in MealSlot::ALL {
            let rendered: Vec<String> = extras
                .iter()
                .filter(|extra| extra.meal_slot == slot)
                .map(|extra| {
                    *slot_totals.entry(slot).or_default() += extra.price;
                    display::format_extra_display(extra, menu.get(&extra.menu_item_id))
                })
                .collect();
            cells.insert(slot, display::format_cell(&rendered));
        }

        let breakfast_total = slot_totals.get(&MealSlot::Breakfast).copied().unwrap_or(0.0);
        let lunch_total = slot_totals.get(&MealSlot::Lunch).copied().unwrap_or(0.0);
        let dinner_total = slot_totals.get(&MealSlot::Dinner).copied().unwrap_or(0.0);
        let extras_total = breakfast_total + lunch_total + dinner_total;

        let subscription_total = match customer.subscription_type {
            SubscriptionType::Daily => customer.daily_amount,
            SubscriptionType::Monthly => 0.0,
        };

        let summary = InvoiceSummary {
            days_in_month: 1,
            daily_amount: customer.daily_amount,
            subscription_total,
            breakfast_total,
            lunch_total,
            dinner_total,
            extras_total,
            total_advance: 0.0,
            grand_total: subscription_total + extras_total,
        };

        let row = DateWiseRow {
            date,
            day: calendar::weekday_name(date).to_string(),
            breakfast: cells.remove(&MealSlot::Breakfast).unwrap_or_else(|| display::EMPTY_CELL.to_string()),
            lunch: cells.remove(&MealSlot::Lunch).unwrap_or_else(|| display::EMPTY_CELL.to_string()),
            dinner: cells.remove(&MealSlot::Dinner).unwrap_or_else(|| display::EMPTY_CELL.to_string()),
        };

        Ok(InvoiceData {
            customer,
            period_type: PeriodType::Daily,
            year: None,
            month: None,
            month_name: None,
            date: Some(date),
            date_wise_data: vec![row],
            summary,
        })
    }

    async fn require_customer(&self, customer_id: &str) -> Result<Customer, AppError> {
        self.db
            .get_customer(customer_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Customer {customer_id} not found")))
    }

    /// Fetch the menu items the given extras reference, keyed by id.
    /// Missing items are simply absent; the formatter falls back to
    /// "Item" for them.
    async fn resolve_menu_items(
        &self,
        extras: &[DailyExtra],
    ) -> Result<HashMap<String, MenuItem>, AppError> {
        let mut menu = HashMap::new();
        for extra in extras {
            if menu.contains_key(&extra.menu_item_id) {
                continue;
            }
            if let Some(item) = self.db.get_menu_item(&extra.menu_item_id).await? {
                menu.insert(extra.menu_item_id.clone(), item);
            }
        }
        Ok(menu)
    }
}

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Meal slot within a day. Also used as the menu category, since every
/// menu item belongs to exactly one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealSlot {
    /// All slots in billing order (breakfast, then lunch, then dinner).
    pub const ALL: [MealSlot; 3] = [MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Dinner => "dinner",
        }
    }

    pub fn parse(s: &str) -> Option<MealSlot> {
        match s {
            "breakfast" => Some(MealSlot::Breakfast),
            "lunch" => Some(MealSlot::Lunch),
            "dinner" => Some(MealSlot::Dinner),
            _ => None,
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a customer is billed: per elapsed day, or one flat monthly fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionType {
    Daily,
    Monthly,
}

impl SubscriptionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionType::Daily => "daily",
            SubscriptionType::Monthly => "monthly",
        }
    }

    pub fn parse(s: &str) -> Option<SubscriptionType> {
        match s {
            "daily" => Some(SubscriptionType::Daily),
            "monthly" => Some(SubscriptionType::Monthly),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerStatus {
    Active,
    Paused,
}

impl CustomerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerStatus::Active => "active",
            CustomerStatus::Paused => "paused",
        }
    }

    pub fn parse(s: &str) -> Option<CustomerStatus> {
        match s {
            "active" => Some(CustomerStatus::Active),
            "paused" => Some(CustomerStatus::Paused),
            _ => None,
        }
    }
}

/// A subscribed customer of the mess.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    /// Exactly 10 ascii digits.
    pub mobile: String,
    pub address: String,
    pub subscription_type: SubscriptionType,
    /// Per-day charge for `Daily` subscribers; flat monthly fee for `Monthly`.
    pub daily_amount: f64,
    pub start_date: NaiveDate,
    pub status: CustomerStatus,
}

/// A catalogue entry customers can order as an extra.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub category: MealSlot,
    pub price: f64,
    pub description: String,
    pub available: bool,
}

/// One ad hoc order beyond the standing subscription. At most one exists
/// per (customer, date, meal slot); re-admitting the same slot overwrites
/// the previous entry in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyExtra {
    pub id: String,
    pub customer_id: String,
    pub date: NaiveDate,
    pub meal_slot: MealSlot,
    pub menu_item_id: String,
    /// Price captured when the extra was admitted; later menu-item price
    /// changes do not alter it.
    pub price: f64,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A prepaid credit applied against one month's invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvancePayment {
    pub id: String,
    pub customer_id: String,
    pub amount: f64,
    /// Target month, 1-12.
    pub month: u32,
    pub year: i32,
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCustomerRequest {
    pub name: String,
    pub mobile: String,
    pub address: String,
    pub subscription_type: SubscriptionType,
    pub daily_amount: f64,
    pub start_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateCustomerRequest {
    pub name: String,
    pub mobile: String,
    pub address: String,
    pub subscription_type: SubscriptionType,
    pub daily_amount: f64,
    pub start_date: NaiveDate,
    pub status: CustomerStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateMenuItemRequest {
    pub name: String,
    pub category: MealSlot,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_true")]
    pub available: bool,
}

fn default_true() -> bool {
    true
}

/// A proposed extra-entry write. The admission engine applies the
/// at-most-one-per-slot rule; an existing entry for the same
/// (customer, date, slot) is overwritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdmitExtraRequest {
    pub customer_id: String,
    pub date: NaiveDate,
    pub meal_slot: MealSlot,
    pub menu_item_id: String,
    pub price: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoveExtrasRequest {
    pub customer_id: String,
    pub date: NaiveDate,
    /// When absent, all of the customer's entries for the date are removed.
    #[serde(default)]
    pub meal_slot: Option<MealSlot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAdvanceRequest {
    pub customer_id: String,
    pub amount: f64,
    pub month: u32,
    pub year: i32,
}

// ---------------------------------------------------------------------------
// Invoice output
//
// Field names here are a wire contract consumed by the invoice renderer
// and by golden-output tests, hence the camelCase serialization.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodType {
    Daily,
    Monthly,
}

/// One row of the day-by-day invoice table. Meal cells hold the rendered
/// display string for that slot's extra, or a literal "-" when empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateWiseRow {
    pub date: NaiveDate,
    /// Weekday name, e.g. "Monday".
    pub day: String,
    pub breakfast: String,
    pub lunch: String,
    pub dinner: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSummary {
    pub days_in_month: u32,
    pub daily_amount: f64,
    pub subscription_total: f64,
    pub breakfast_total: f64,
    pub lunch_total: f64,
    pub dinner_total: f64,
    pub extras_total: f64,
    pub total_advance: f64,
    pub grand_total: f64,
}

/// A complete billing statement for one customer and one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceData {
    pub customer: Customer,
    pub period_type: PeriodType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub date_wise_data: Vec<DateWiseRow>,
    pub summary: InvoiceSummary,
}

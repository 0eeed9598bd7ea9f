use anyhow::{anyhow, Result};
use chrono::{DateTime, NaiveDate, Utc};
use shared::{AdvancePayment, Customer, CustomerStatus, DailyExtra, MealSlot, MenuItem, SubscriptionType};
use sqlx::{migrate::MigrateDatabase, sqlite::SqliteRow, Row, Sqlite, SqlitePool};
use std::sync::Arc;

// The database URL for the production database
const DATABASE_URL: &str = "sqlite:mess_manager.db";

/// DbConnection is the record store for customers, menu items, daily
/// extras and advance payments. Dates are stored as ISO `YYYY-MM-DD`
/// text and compared as calendar dates only; no time-of-day component
/// ever enters a date column.
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Create a new database connection
    pub async fn new(url: &str) -> Result<Self> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url).await?
        }

        let pool = SqlitePool::connect(url).await?;
        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Initialize the standard database
    pub async fn init() -> Result<Self> {
        Self::new(DATABASE_URL).await
    }

    /// Initialize a test database with a unique name
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        // Generate a unique database name for tests
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url).await
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        let tables = [
            r#"
            CREATE TABLE IF NOT EXISTS customers (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                mobile TEXT NOT NULL,
                address TEXT NOT NULL,
                subscription_type TEXT NOT NULL,
                daily_amount REAL NOT NULL,
                start_date TEXT NOT NULL,
                status TEXT NOT NULL
            );
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS menu_items (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                category TEXT NOT NULL,
                price REAL NOT NULL,
                description TEXT NOT NULL,
                available INTEGER NOT NULL
            );
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS daily_extras (
                id TEXT PRIMARY KEY,
                customer_id TEXT NOT NULL,
                date TEXT NOT NULL,
                meal_slot TEXT NOT NULL,
                menu_item_id TEXT NOT NULL,
                price REAL NOT NULL,
                notes TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                UNIQUE (customer_id, date, meal_slot)
            );
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS advance_payments (
                id TEXT PRIMARY KEY,
                customer_id TEXT NOT NULL,
                amount REAL NOT NULL,
                month INTEGER NOT NULL,
                year INTEGER NOT NULL
            );
            "#,
        ];

        for table in tables {
            sqlx::query(table).execute(pool).await?;
        }

        Ok(())
    }

    /// Get the underlying SQLite pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // -----------------------------------------------------------------------
    // Customers
    // -----------------------------------------------------------------------

    pub async fn insert_customer(&self, customer: &Customer) -> Result<()> {
        sqlx::query(
            "INSERT INTO customers (id, name, mobile, address, subscription_type, daily_amount, start_date, status) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&customer.id)
        .bind(&customer.name)
        .bind(&customer.mobile)
        .bind(&customer.address)
        .bind(customer.subscription_type.as_str())
        .bind(customer.daily_amount)
        .bind(customer.start_date.to_string())
        .bind(customer.status.as_str())
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    pub async fn get_customer(&self, id: &str) -> Result<Option<Customer>> {
        let row = sqlx::query("SELECT * FROM customers WHERE id = ?")
            .bind(id)
            .fetch_optional(&*self.pool)
            .await?;

        row.as_ref().map(customer_from_row).transpose()
    }

    /// List all customers ordered by name
    pub async fn list_customers(&self) -> Result<Vec<Customer>> {
        let rows = sqlx::query("SELECT * FROM customers ORDER BY name")
            .fetch_all(&*self.pool)
            .await?;

        rows.iter().map(customer_from_row).collect()
    }

    /// Returns true if a customer with this id existed and was updated
    pub async fn update_customer(&self, customer: &Customer) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE customers SET name = ?, mobile = ?, address = ?, subscription_type = ?, \
             daily_amount = ?, start_date = ?, status = ? WHERE id = ?",
        )
        .bind(&customer.name)
        .bind(&customer.mobile)
        .bind(&customer.address)
        .bind(customer.subscription_type.as_str())
        .bind(customer.daily_amount)
        .bind(customer.start_date.to_string())
        .bind(customer.status.as_str())
        .bind(&customer.id)
        .execute(&*self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_customer(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM customers WHERE id = ?")
            .bind(id)
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Menu items
    // -----------------------------------------------------------------------

    pub async fn insert_menu_item(&self, item: &MenuItem) -> Result<()> {
        sqlx::query(
            "INSERT INTO menu_items (id, name, category, price, description, available) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(item.category.as_str())
        .bind(item.price)
        .bind(&item.description)
        .bind(item.available)
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    pub async fn get_menu_item(&self, id: &str) -> Result<Option<MenuItem>> {
        let row = sqlx::query("SELECT * FROM menu_items WHERE id = ?")
            .bind(id)
            .fetch_optional(&*self.pool)
            .await?;

        row.as_ref().map(menu_item_from_row).transpose()
    }

    pub async fn list_menu_items(&self) -> Result<Vec<MenuItem>> {
        let rows = sqlx::query("SELECT * FROM menu_items ORDER BY name")
            .fetch_all(&*self.pool)
            .await?;

        rows.iter().map(menu_item_from_row).collect()
    }

    /// List available menu items for one category
    pub async fn menu_items_by_category(&self, category: MealSlot) -> Result<Vec<MenuItem>> {
        let rows = sqlx::query(
            "SELECT * FROM menu_items WHERE category = ? AND available = 1 ORDER BY name",
        )
        .bind(category.as_str())
        .fetch_all(&*self.pool)
        .await?;

        rows.iter().map(menu_item_from_row).collect()
    }

    pub async fn update_menu_item(&self, item: &MenuItem) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE menu_items SET name = ?, category = ?, price = ?, description = ?, \
             available = ? WHERE id = ?",
        )
        .bind(&item.name)
        .bind(item.category.as_str())
        .bind(item.price)
        .bind(&item.description)
        .bind(item.available)
        .bind(&item.id)
        .execute(&*self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_menu_item(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM menu_items WHERE id = ?")
            .bind(id)
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Daily extras
    // -----------------------------------------------------------------------

    /// Store the single entry for (customer, date, slot). An existing row
    /// for the same triple keeps its id and created_at; only the item
    /// reference, price, notes and updated_at are replaced.
    pub async fn upsert_extra(&self, extra: &DailyExtra) -> Result<()> {
        sqlx::query(
            "INSERT INTO daily_extras (id, customer_id, date, meal_slot, menu_item_id, price, notes, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) \
             ON CONFLICT (customer_id, date, meal_slot) DO UPDATE SET \
             menu_item_id = excluded.menu_item_id, price = excluded.price, \
             notes = excluded.notes, updated_at = excluded.updated_at",
        )
        .bind(&extra.id)
        .bind(&extra.customer_id)
        .bind(extra.date.to_string())
        .bind(extra.meal_slot.as_str())
        .bind(&extra.menu_item_id)
        .bind(extra.price)
        .bind(&extra.notes)
        .bind(extra.created_at.to_rfc3339())
        .bind(extra.updated_at.to_rfc3339())
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    pub async fn find_extra(
        &self,
        customer_id: &str,
        date: NaiveDate,
        meal_slot: MealSlot,
    ) -> Result<Option<DailyExtra>> {
        let row = sqlx::query(
            "SELECT * FROM daily_extras WHERE customer_id = ? AND date = ? AND meal_slot = ?",
        )
        .bind(customer_id)
        .bind(date.to_string())
        .bind(meal_slot.as_str())
        .fetch_optional(&*self.pool)
        .await?;

        row.as_ref().map(extra_from_row).transpose()
    }

    /// All of one customer's extras within a calendar month, in ascending
    /// date then breakfast/lunch/dinner order.
    pub async fn extras_for_customer_in_month(
        &self,
        customer_id: &str,
        year: i32,
        month: u32,
    ) -> Result<Vec<DailyExtra>> {
        let prefix = format!("{:04}-{:02}-", year, month);
        let rows = sqlx::query(
            "SELECT * FROM daily_extras WHERE customer_id = ? AND date LIKE ? \
             ORDER BY date, CASE meal_slot WHEN 'breakfast' THEN 0 WHEN 'lunch' THEN 1 ELSE 2 END",
        )
        .bind(customer_id)
        .bind(format!("{prefix}%"))
        .fetch_all(&*self.pool)
        .await?;

        rows.iter().map(extra_from_row).collect()
    }

    /// All entries across all customers for one date
    pub async fn extras_for_date(&self, date: NaiveDate) -> Result<Vec<DailyExtra>> {
        let rows = sqlx::query(
            "SELECT * FROM daily_extras WHERE date = ? \
             ORDER BY customer_id, CASE meal_slot WHEN 'breakfast' THEN 0 WHEN 'lunch' THEN 1 ELSE 2 END",
        )
        .bind(date.to_string())
        .fetch_all(&*self.pool)
        .await?;

        rows.iter().map(extra_from_row).collect()
    }

    /// Delete one slot's entry, or all of the customer's entries for the
    /// date when no slot is given. Returns the number of rows removed.
    pub async fn delete_extras(
        &self,
        customer_id: &str,
        date: NaiveDate,
        meal_slot: Option<MealSlot>,
    ) -> Result<u64> {
        let result = match meal_slot {
            Some(slot) => {
                sqlx::query(
                    "DELETE FROM daily_extras WHERE customer_id = ? AND date = ? AND meal_slot = ?",
                )
                .bind(customer_id)
                .bind(date.to_string())
                .bind(slot.as_str())
                .execute(&*self.pool)
                .await?
            }
            None => {
                sqlx::query("DELETE FROM daily_extras WHERE customer_id = ? AND date = ?")
                    .bind(customer_id)
                    .bind(date.to_string())
                    .execute(&*self.pool)
                    .await?
            }
        };
        Ok(result.rows_affected())
    }

    // -----------------------------------------------------------------------
    // Advance payments
    // -----------------------------------------------------------------------

    pub async fn insert_advance(&self, advance: &AdvancePayment) -> Result<()> {
        sqlx::query(
            "INSERT INTO advance_payments (id, customer_id, amount, month, year) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&advance.id)
        .bind(&advance.customer_id)
        .bind(advance.amount)
        .bind(advance.month)
        .bind(advance.year)
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    /// All advances a customer paid within one calendar year, each tagged
    /// with its target month
    pub async fn list_advances(&self, customer_id: &str, year: i32) -> Result<Vec<AdvancePayment>> {
        let rows = sqlx::query(
            "SELECT * FROM advance_payments WHERE customer_id = ? AND year = ? ORDER BY month",
        )
        .bind(customer_id)
        .bind(year)
        .fetch_all(&*self.pool)
        .await?;

        rows.iter().map(advance_from_row).collect()
    }

    pub async fn advances_for_month(
        &self,
        customer_id: &str,
        year: i32,
        month: u32,
    ) -> Result<Vec<AdvancePayment>> {
        let rows = sqlx::query(
            "SELECT * FROM advance_payments WHERE customer_id = ? AND year = ? AND month = ?",
        )
        .bind(customer_id)
        .bind(year)
        .bind(month)
        .fetch_all(&*self.pool)
        .await?;

        rows.iter().map(advance_from_row).collect()
    }

    pub async fn delete_advance(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM advance_payments WHERE id = ?")
            .bind(id)
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ---------------------------------------------------------------------------
// Row mapping
// ---------------------------------------------------------------------------

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| anyhow!("invalid stored date {s:?}: {e}"))
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| anyhow!("invalid stored timestamp {s:?}: {e}"))
}

fn customer_from_row(row: &SqliteRow) -> Result<Customer> {
    let subscription_type: String = row.get("subscription_type");
    let status: String = row.get("status");
    let start_date: String = row.get("start_date");

    Ok(Customer {
        id: row.get("id"),
        name: row.get("name"),
        mobile: row.get("mobile"),
        address: row.get("address"),
        subscription_type: SubscriptionType::parse(&subscription_type)
            .ok_or_else(|| anyhow!("unknown subscription type {subscription_type:?}"))?,
        daily_amount: row.get("daily_amount"),
        start_date: parse_date(&start_date)?,
        status: CustomerStatus::parse(&status)
            .ok_or_else(|| anyhow!("unknown customer status {status:?}"))?,
    })
}

fn menu_item_from_row(row: &SqliteRow) -> Result<MenuItem> {
    let category: String = row.get("category");

    Ok(MenuItem {
        id: row.get("id"),
        name: row.get("name"),
        category: MealSlot::parse(&category)
            .ok_or_else(|| anyhow!("unknown menu category {category:?}"))?,
        price: row.get("price"),
        description: row.get("description"),
        available: row.get("available"),
    })
}

fn extra_from_row(row: &SqliteRow) -> Result<DailyExtra> {
    let date: String = row.get("date");
    let meal_slot: String = row.get("meal_slot");
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");

    Ok(DailyExtra {
        id: row.get("id"),
        customer_id: row.get("customer_id"),
        date: parse_date(&date)?,
        meal_slot: MealSlot::parse(&meal_slot)
            .ok_or_else(|| anyhow!("unknown meal slot {meal_slot:?}"))?,
        menu_item_id: row.get("menu_item_id"),
        price: row.get("price"),
        notes: row.get("notes"),
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}

fn advance_from_row(row: &SqliteRow) -> Result<AdvancePayment> {
    Ok(AdvancePayment {
        id: row.get("id"),
        customer_id: row.get("customer_id"),
        amount: row.get("amount"),
        month: row.get::<i64, _>("month") as u32,
        year: row.get::<i64, _>("year") as i32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // Setup a new test database for each test
    async fn setup_test() -> DbConnection {
        DbConnection::init_test().await.expect("Failed to create test database")
    }

    fn test_customer(id: &str, name: &str) -> Customer {
        Customer {
            id: id.to_string(),
            name: name.to_string(),
            mobile: "9876543210".to_string(),
            address: "MG Road, Pune".to_string(),
            subscription_type: SubscriptionType::Daily,
            daily_amount: 300.0,
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            status: CustomerStatus::Active,
        }
    }

    fn test_extra(customer_id: &str, date: NaiveDate, slot: MealSlot, price: f64) -> DailyExtra {
        DailyExtra {
            id: uuid::Uuid::new_v4().to_string(),
            customer_id: customer_id.to_string(),
            date,
            meal_slot: slot,
            menu_item_id: "item-1".to_string(),
            price,
            notes: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_customer_round_trip() {
        let db = setup_test().await;
        let customer = test_customer("cust-1", "Asha Patil");

        db.insert_customer(&customer).await.expect("Failed to insert customer");

        let fetched = db.get_customer("cust-1").await.expect("Failed to get customer");
        assert_eq!(fetched, Some(customer));
    }

    #[tokio::test]
    async fn test_get_nonexistent_customer() {
        let db = setup_test().await;

        let result = db.get_customer("nope").await.expect("Query failed");
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_update_and_delete_customer() {
        let db = setup_test().await;
        let mut customer = test_customer("cust-1", "Asha Patil");
        db.insert_customer(&customer).await.unwrap();

        customer.daily_amount = 350.0;
        customer.status = CustomerStatus::Paused;
        assert!(db.update_customer(&customer).await.unwrap());

        let fetched = db.get_customer("cust-1").await.unwrap().unwrap();
        assert_eq!(fetched.daily_amount, 350.0);
        assert_eq!(fetched.status, CustomerStatus::Paused);

        assert!(db.delete_customer("cust-1").await.unwrap());
        assert!(!db.delete_customer("cust-1").await.unwrap());
        assert!(db.get_customer("cust-1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_customers_ordered_by_name() {
        let db = setup_test().await;
        db.insert_customer(&test_customer("c2", "Ravi")).await.unwrap();
        db.insert_customer(&test_customer("c1", "Asha")).await.unwrap();

        let customers = db.list_customers().await.unwrap();
        let names: Vec<&str> = customers.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Asha", "Ravi"]);
    }

    #[tokio::test]
    async fn test_menu_items_by_category_filters_unavailable() {
        let db = setup_test().await;
        let thali = MenuItem {
            id: "item-1".to_string(),
            name: "Veg Thali".to_string(),
            category: MealSlot::Lunch,
            price: 80.0,
            description: String::new(),
            available: true,
        };
        let off_menu = MenuItem {
            id: "item-2".to_string(),
            name: "Paneer Thali".to_string(),
            category: MealSlot::Lunch,
            price: 110.0,
            description: String::new(),
            available: false,
        };
        let poha = MenuItem {
            id: "item-3".to_string(),
            name: "Poha".to_string(),
            category: MealSlot::Breakfast,
            price: 30.0,
            description: String::new(),
            available: true,
        };
        db.insert_menu_item(&thali).await.unwrap();
        db.insert_menu_item(&off_menu).await.unwrap();
        db.insert_menu_item(&poha).await.unwrap();

        let lunch = db.menu_items_by_category(MealSlot::Lunch).await.unwrap();
        assert_eq!(lunch, vec![thali]);
    }

    #[tokio::test]
    async fn test_upsert_extra_overwrites_same_slot() {
        let db = setup_test().await;
        let date = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();

        let first = test_extra("cust-1", date, MealSlot::Breakfast, 40.0);
        db.upsert_extra(&first).await.unwrap();

        // Second write for the same triple carries a different row id; the
        // stored row must keep the first id and created_at.
        let mut second = test_extra("cust-1", date, MealSlot::Breakfast, 45.0);
        second.notes = "less oil".to_string();
        db.upsert_extra(&second).await.unwrap();

        let stored = db
            .find_extra("cust-1", date, MealSlot::Breakfast)
            .await
            .unwrap()
            .expect("entry should exist");
        assert_eq!(stored.id, first.id);
        assert_eq!(stored.created_at, first.created_at);
        assert_eq!(stored.price, 45.0);
        assert_eq!(stored.notes, "less oil");

        let all = db.extras_for_date(date).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_extras_for_month_excludes_neighbouring_months() {
        let db = setup_test().await;
        let jan_10 = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();
        let jan_31 = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
        let feb_1 = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();

        db.upsert_extra(&test_extra("cust-1", jan_10, MealSlot::Lunch, 80.0)).await.unwrap();
        db.upsert_extra(&test_extra("cust-1", jan_31, MealSlot::Dinner, 60.0)).await.unwrap();
        db.upsert_extra(&test_extra("cust-1", feb_1, MealSlot::Lunch, 80.0)).await.unwrap();
        db.upsert_extra(&test_extra("cust-2", jan_10, MealSlot::Lunch, 80.0)).await.unwrap();

        let extras = db.extras_for_customer_in_month("cust-1", 2026, 1).await.unwrap();
        assert_eq!(extras.len(), 2);
        assert_eq!(extras[0].date, jan_10);
        assert_eq!(extras[1].date, jan_31);
    }

    #[tokio::test]
    async fn test_extras_ordering_within_a_day() {
        let db = setup_test().await;
        let date = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();

        db.upsert_extra(&test_extra("cust-1", date, MealSlot::Dinner, 60.0)).await.unwrap();
        db.upsert_extra(&test_extra("cust-1", date, MealSlot::Breakfast, 30.0)).await.unwrap();
        db.upsert_extra(&test_extra("cust-1", date, MealSlot::Lunch, 80.0)).await.unwrap();

        let extras = db.extras_for_customer_in_month("cust-1", 2026, 1).await.unwrap();
        let slots: Vec<MealSlot> = extras.iter().map(|e| e.meal_slot).collect();
        assert_eq!(slots, vec![MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner]);
    }

    #[tokio::test]
    async fn test_delete_extras_single_slot_and_whole_day() {
        let db = setup_test().await;
        let date = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();

        db.upsert_extra(&test_extra("cust-1", date, MealSlot::Breakfast, 30.0)).await.unwrap();
        db.upsert_extra(&test_extra("cust-1", date, MealSlot::Lunch, 80.0)).await.unwrap();
        db.upsert_extra(&test_extra("cust-1", date, MealSlot::Dinner, 60.0)).await.unwrap();

        let removed = db.delete_extras("cust-1", date, Some(MealSlot::Lunch)).await.unwrap();
        assert_eq!(removed, 1);
        assert!(db.find_extra("cust-1", date, MealSlot::Lunch).await.unwrap().is_none());

        let removed = db.delete_extras("cust-1", date, None).await.unwrap();
        assert_eq!(removed, 2);
        assert!(db.extras_for_date(date).await.unwrap().is_empty());

        // Deleting again matches nothing and is not an error
        let removed = db.delete_extras("cust-1", date, None).await.unwrap();
        assert_eq!(removed, 0);
    }

    #[tokio::test]
    async fn test_advances_filtered_by_month_and_year() {
        let db = setup_test().await;
        let advances = [
            ("adv-1", "cust-1", 500.0, 1, 2026),
            ("adv-2", "cust-1", 200.0, 2, 2026),
            ("adv-3", "cust-1", 300.0, 1, 2025),
            ("adv-4", "cust-2", 400.0, 1, 2026),
        ];
        for (id, customer_id, amount, month, year) in advances {
            db.insert_advance(&AdvancePayment {
                id: id.to_string(),
                customer_id: customer_id.to_string(),
                amount,
                month,
                year,
            })
            .await
            .unwrap();
        }

        let year_2026 = db.list_advances("cust-1", 2026).await.unwrap();
        assert_eq!(year_2026.len(), 2);

        let jan_2026 = db.advances_for_month("cust-1", 2026, 1).await.unwrap();
        assert_eq!(jan_2026.len(), 1);
        assert_eq!(jan_2026[0].amount, 500.0);

        assert!(db.delete_advance("adv-1").await.unwrap());
        assert!(db.advances_for_month("cust-1", 2026, 1).await.unwrap().is_empty());
    }
}

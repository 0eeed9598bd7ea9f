use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::{
    AdmitExtraRequest, CreateAdvanceRequest, CreateCustomerRequest, CreateMenuItemRequest,
    MealSlot, MenuItem, RemoveExtrasRequest, UpdateCustomerRequest,
};
use tracing::info;

use crate::db::DbConnection;
use crate::domain::{AdvanceService, CustomerService, ExtraService, InvoiceService, MenuService};
use crate::error::AppError;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub customer_service: CustomerService,
    pub menu_service: MenuService,
    pub extra_service: ExtraService,
    pub advance_service: AdvanceService,
    pub invoice_service: InvoiceService,
}

impl AppState {
    /// Wire all services onto one database connection
    pub fn new(db: DbConnection) -> Self {
        Self {
            customer_service: CustomerService::new(db.clone()),
            menu_service: MenuService::new(db.clone()),
            extra_service: ExtraService::new(db.clone()),
            advance_service: AdvanceService::new(db.clone()),
            invoice_service: InvoiceService::new(db),
        }
    }
}

/// All API routes, to be nested under `/api`
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/customers", post(create_customer).get(list_customers))
        .route(
            "/customers/:id",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
        .route("/menu-items", post(create_menu_item).get(list_menu_items))
        .route(
            "/menu-items/:id",
            get(get_menu_item).put(update_menu_item).delete(delete_menu_item),
        )
        .route("/extras", post(admit_extra).get(extras_for_date).delete(remove_extras))
        .route("/extras/find", get(find_extra))
        .route("/advances", post(record_advance).get(list_advances))
        .route("/advances/:id", delete(delete_advance))
        .route("/invoices/monthly/:customer_id", get(monthly_invoice))
        .route("/invoices/daily/:customer_id", get(daily_invoice))
}

// ---------------------------------------------------------------------------
// Customers
// ---------------------------------------------------------------------------

async fn create_customer(
    State(state): State<AppState>,
    Json(request): Json<CreateCustomerRequest>,
) -> Result<impl IntoResponse, AppError> {
    info!("POST /api/customers - {}", request.name);
    let customer = state.customer_service.create_customer(request).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

async fn list_customers(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let customers = state.customer_service.list_customers().await?;
    Ok(Json(customers))
}

async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let customer = state.customer_service.get_customer(&id).await?;
    Ok(Json(customer))
}

async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateCustomerRequest>,
) -> Result<impl IntoResponse, AppError> {
    info!("PUT /api/customers/{}", id);
    let customer = state.customer_service.update_customer(&id, request).await?;
    Ok(Json(customer))
}

async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    info!("DELETE /api/customers/{}", id);
    state.customer_service.delete_customer(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Menu items
// ---------------------------------------------------------------------------

#[derive(Deserialize, Debug)]
struct MenuListQuery {
    category: Option<MealSlot>,
}

async fn create_menu_item(
    State(state): State<AppState>,
    Json(request): Json<CreateMenuItemRequest>,
) -> Result<impl IntoResponse, AppError> {
    info!("POST /api/menu-items - {}", request.name);
    let item = state.menu_service.create_menu_item(request).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn list_menu_items(
    State(state): State<AppState>,
    Query(query): Query<MenuListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let items = match query.category {
        Some(category) => state.menu_service.menu_items_by_category(category).await?,
        None => state.menu_service.list_menu_items().await?,
    };
    Ok(Json(items))
}

async fn get_menu_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let item = state.menu_service.get_menu_item(&id).await?;
    Ok(Json(item))
}

async fn update_menu_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(mut item): Json<MenuItem>,
) -> Result<impl IntoResponse, AppError> {
    info!("PUT /api/menu-items/{}", id);
    item.id = id;
    let item = state.menu_service.update_menu_item(item).await?;
    Ok(Json(item))
}

async fn delete_menu_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    info!("DELETE /api/menu-items/{}", id);
    state.menu_service.delete_menu_item(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Daily extras
// ---------------------------------------------------------------------------

#[derive(Deserialize, Debug)]
struct ExtrasForDateQuery {
    date: NaiveDate,
}

#[derive(Deserialize, Debug)]
struct FindExtraQuery {
    customer_id: String,
    date: NaiveDate,
    meal_slot: MealSlot,
}

#[derive(Serialize, Debug)]
struct RemovedResponse {
    removed: u64,
}

async fn admit_extra(
    State(state): State<AppState>,
    Json(request): Json<AdmitExtraRequest>,
) -> Result<impl IntoResponse, AppError> {
    info!(
        "POST /api/extras - customer {} {} on {}",
        request.customer_id, request.meal_slot, request.date
    );
    let entry = state.extra_service.admit_extra(request).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

async fn extras_for_date(
    State(state): State<AppState>,
    Query(query): Query<ExtrasForDateQuery>,
) -> Result<impl IntoResponse, AppError> {
    let extras = state.extra_service.extras_for_date(query.date).await?;
    Ok(Json(extras))
}

async fn find_extra(
    State(state): State<AppState>,
    Query(query): Query<FindExtraQuery>,
) -> Result<impl IntoResponse, AppError> {
    let extra = state
        .extra_service
        .find_extra(&query.customer_id, query.date, query.meal_slot)
        .await?
        .ok_or_else(|| {
            AppError::not_found(format!(
                "No {} extra for customer {} on {}",
                query.meal_slot, query.customer_id, query.date
            ))
        })?;
    Ok(Json(extra))
}

async fn remove_extras(
    State(state): State<AppState>,
    Json(request): Json<RemoveExtrasRequest>,
) -> Result<impl IntoResponse, AppError> {
    info!(
        "DELETE /api/extras - customer {} on {}",
        request.customer_id, request.date
    );
    let removed = state
        .extra_service
        .remove_extras(&request.customer_id, request.date, request.meal_slot)
        .await?;
    Ok(Json(RemovedResponse { removed }))
}

// ---------------------------------------------------------------------------
// Advance payments
// ---------------------------------------------------------------------------

#[derive(Deserialize, Debug)]
struct AdvanceListQuery {
    customer_id: String,
    year: i32,
}

async fn record_advance(
    State(state): State<AppState>,
    Json(request): Json<CreateAdvanceRequest>,
) -> Result<impl IntoResponse, AppError> {
    info!(
        "POST /api/advances - customer {} {}/{}",
        request.customer_id, request.month, request.year
    );
    let advance = state.advance_service.record_advance(request).await?;
    Ok((StatusCode::CREATED, Json(advance)))
}

async fn list_advances(
    State(state): State<AppState>,
    Query(query): Query<AdvanceListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let advances = state
        .advance_service
        .list_advances(&query.customer_id, query.year)
        .await?;
    Ok(Json(advances))
}

async fn delete_advance(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.advance_service.delete_advance(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Invoices
// ---------------------------------------------------------------------------

#[derive(Deserialize, Debug)]
struct MonthlyInvoiceQuery {
    year: i32,
    month: u32,
}

#[derive(Deserialize, Debug)]
struct DailyInvoiceQuery {
    date: NaiveDate,
}

async fn monthly_invoice(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
    Query(query): Query<MonthlyInvoiceQuery>,
) -> Result<impl IntoResponse, AppError> {
    info!(
        "GET /api/invoices/monthly/{} - {}/{}",
        customer_id, query.month, query.year
    );
    let invoice = state
        .invoice_service
        .generate_monthly_invoice(&customer_id, query.year, query.month)
        .await?;
    Ok(Json(invoice))
}

async fn daily_invoice(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
    Query(query): Query<DailyInvoiceQuery>,
) -> Result<impl IntoResponse, AppError> {
    info!("GET /api/invoices/daily/{} - {}", customer_id, query.date);
    let invoice = state
        .invoice_service
        .generate_daily_invoice(&customer_id, query.date)
        .await?;
    Ok(Json(invoice))
}

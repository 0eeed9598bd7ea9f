//! Domain services.
//!
//! Each service wraps the shared [`DbConnection`](crate::db::DbConnection)
//! and owns one slice of business logic. The interesting pieces are the
//! extras admission rule ([`extras`]) and the invoice aggregation
//! ([`invoice`]); the rest is catalogue and customer bookkeeping.

pub mod advances;
pub mod calendar;
pub mod customers;
pub mod display;
pub mod extras;
pub mod invoice;
pub mod menu;

pub use advances::AdvanceService;
pub use customers::CustomerService;
pub use extras::ExtraService;
pub use invoice::InvoiceService;
pub use menu::MenuService;

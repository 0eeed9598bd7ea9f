//! Advance payments: prepaid credits applied against a specific month's
//! invoice. These are monthly-only; daily invoices never deduct them.

use crate::db::DbConnection;
use crate::error::AppError;
use shared::{AdvancePayment, CreateAdvanceRequest};
use tracing::info;
use uuid::Uuid;

#[derive(Clone)]
pub struct AdvanceService {
    db: DbConnection,
}

impl AdvanceService {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    pub async fn record_advance(&self, request: CreateAdvanceRequest) -> Result<AdvancePayment, AppError> {
        if request.amount <= 0.0 {
            return Err(AppError::validation(format!(
                "advance amount must be positive, got {}",
                request.amount
            )));
        }
        if !(1..=12).contains(&request.month) {
            return Err(AppError::validation(format!(
                "month must be between 1 and 12, got {}",
                request.month
            )));
        }

        let advance = AdvancePayment {
            id: Uuid::new_v4().to_string(),
            customer_id: request.customer_id,
            amount: request.amount,
            month: request.month,
            year: request.year,
        };
        self.db.insert_advance(&advance).await?;

        info!(
            "Recorded advance of {} for customer {} ({}/{})",
            advance.amount, advance.customer_id, advance.month, advance.year
        );
        Ok(advance)
    }

    /// A customer's advances within one calendar year, each tagged with
    /// its target month
    pub async fn list_advances(&self, customer_id: &str, year: i32) -> Result<Vec<AdvancePayment>, AppError> {
        Ok(self.db.list_advances(customer_id, year).await?)
    }

    pub async fn delete_advance(&self, id: &str) -> Result<(), AppError> {
        if !self.db.delete_advance(id).await? {
            return Err(AppError::not_found(format!("Advance payment {id} not found")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_service() -> AdvanceService {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        AdvanceService::new(db)
    }

    fn create_request(amount: f64, month: u32, year: i32) -> CreateAdvanceRequest {
        CreateAdvanceRequest {
            customer_id: "cust-1".to_string(),
            amount,
            month,
            year,
        }
    }

    #[tokio::test]
    async fn test_record_and_list_advances() {
        let service = setup_service().await;
        service.record_advance(create_request(500.0, 6, 2026)).await.unwrap();
        service.record_advance(create_request(200.0, 7, 2026)).await.unwrap();
        service.record_advance(create_request(300.0, 6, 2025)).await.unwrap();

        let advances = service.list_advances("cust-1", 2026).await.unwrap();
        assert_eq!(advances.len(), 2);
        assert_eq!(advances[0].month, 6);
        assert_eq!(advances[1].month, 7);
    }

    #[tokio::test]
    async fn test_non_positive_amount_rejected() {
        let service = setup_service().await;

        for amount in [0.0, -100.0] {
            let err = service.record_advance(create_request(amount, 6, 2026)).await.unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn test_out_of_range_month_rejected() {
        let service = setup_service().await;

        for month in [0, 13] {
            let err = service.record_advance(create_request(500.0, month, 2026)).await.unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn test_delete_advance() {
        let service = setup_service().await;
        let advance = service.record_advance(create_request(500.0, 6, 2026)).await.unwrap();

        service.delete_advance(&advance.id).await.unwrap();
        let err = service.delete_advance(&advance.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}

//! Customer management.

use crate::db::DbConnection;
use crate::error::AppError;
use shared::{CreateCustomerRequest, Customer, CustomerStatus, UpdateCustomerRequest};
use tracing::info;
use uuid::Uuid;

#[derive(Clone)]
pub struct CustomerService {
    db: DbConnection,
}

impl CustomerService {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    pub async fn create_customer(&self, request: CreateCustomerRequest) -> Result<Customer, AppError> {
        validate_mobile(&request.mobile)?;
        validate_daily_amount(request.daily_amount)?;
        if request.name.trim().is_empty() {
            return Err(AppError::validation("customer name must not be empty"));
        }

        let customer = Customer {
            id: Uuid::new_v4().to_string(),
            name: request.name,
            mobile: request.mobile,
            address: request.address,
            subscription_type: request.subscription_type,
            daily_amount: request.daily_amount,
            start_date: request.start_date,
            status: CustomerStatus::Active,
        };
        self.db.insert_customer(&customer).await?;

        info!("Created customer {} ({})", customer.name, customer.id);
        Ok(customer)
    }

    pub async fn get_customer(&self, id: &str) -> Result<Customer, AppError> {
        self.db
            .get_customer(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Customer {id} not found")))
    }

    pub async fn list_customers(&self) -> Result<Vec<Customer>, AppError> {
        Ok(self.db.list_customers().await?)
    }

    pub async fn update_customer(
        &self,
        id: &str,
        request: UpdateCustomerRequest,
    ) -> Result<Customer, AppError> {
        validate_mobile(&request.mobile)?;
        validate_daily_amount(request.daily_amount)?;

        let customer = Customer {
            id: id.to_string(),
            name: request.name,
            mobile: request.mobile,
            address: request.address,
            subscription_type: request.subscription_type,
            daily_amount: request.daily_amount,
            start_date: request.start_date,
            status: request.status,
        };
        if !self.db.update_customer(&customer).await? {
            return Err(AppError::not_found(format!("Customer {id} not found")));
        }
        Ok(customer)
    }

    /// Deleting a customer does not cascade to extras or advances; orphaned
    /// records simply never surface in an invoice again.
    pub async fn delete_customer(&self, id: &str) -> Result<(), AppError> {
        if !self.db.delete_customer(id).await? {
            return Err(AppError::not_found(format!("Customer {id} not found")));
        }
        info!("Deleted customer {}", id);
        Ok(())
    }
}

fn validate_mobile(mobile: &str) -> Result<(), AppError> {
    if mobile.len() != 10 || !mobile.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::validation(format!(
            "mobile number must be exactly 10 digits, got {mobile:?}"
        )));
    }
    Ok(())
}

fn validate_daily_amount(amount: f64) -> Result<(), AppError> {
    if amount < 0.0 {
        return Err(AppError::validation(format!(
            "daily amount must not be negative, got {amount}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::SubscriptionType;

    async fn setup_service() -> CustomerService {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        CustomerService::new(db)
    }

    fn create_request(mobile: &str, daily_amount: f64) -> CreateCustomerRequest {
        CreateCustomerRequest {
            name: "Asha Patil".to_string(),
            mobile: mobile.to_string(),
            address: "MG Road, Pune".to_string(),
            subscription_type: SubscriptionType::Daily,
            daily_amount,
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_customer() {
        let service = setup_service().await;

        let created = service.create_customer(create_request("9876543210", 300.0)).await.unwrap();
        assert_eq!(created.status, CustomerStatus::Active);

        let fetched = service.get_customer(&created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_mobile_must_be_ten_digits() {
        let service = setup_service().await;

        for mobile in ["12345", "98765432101", "98765abcde"] {
            let err = service.create_customer(create_request(mobile, 300.0)).await.unwrap_err();
            assert!(matches!(err, AppError::Validation(_)), "{mobile} should be rejected");
        }
    }

    #[tokio::test]
    async fn test_negative_daily_amount_rejected() {
        let service = setup_service().await;

        let err = service.create_customer(create_request("9876543210", -1.0)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_pauses_customer() {
        let service = setup_service().await;
        let created = service.create_customer(create_request("9876543210", 300.0)).await.unwrap();

        let updated = service
            .update_customer(
                &created.id,
                UpdateCustomerRequest {
                    name: created.name.clone(),
                    mobile: created.mobile.clone(),
                    address: created.address.clone(),
                    subscription_type: created.subscription_type,
                    daily_amount: 350.0,
                    start_date: created.start_date,
                    status: CustomerStatus::Paused,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.daily_amount, 350.0);
        assert_eq!(updated.status, CustomerStatus::Paused);
    }

    #[tokio::test]
    async fn test_get_unknown_customer_is_not_found() {
        let service = setup_service().await;

        let err = service.get_customer("ghost").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}

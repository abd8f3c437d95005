use crate::database::{model::service::ServiceRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{id::ServiceId, service::Service};
use kernel::repository::service::ServiceRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct ServiceRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ServiceRepository for ServiceRepositoryImpl {
    async fn find_all(&self) -> AppResult<Vec<Service>> {
        let rows: Vec<ServiceRow> = sqlx::query_as(
            r#"
            SELECT
                service_id,
                service_name,
                service_type,
                description,
                price,
                capacity
            FROM services
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Service::try_from).collect()
    }

    async fn find_by_id(&self, service_id: ServiceId) -> AppResult<Option<Service>> {
        let row: Option<ServiceRow> = sqlx::query_as(
            r#"
            SELECT
                service_id,
                service_name,
                service_type,
                description,
                price,
                capacity
            FROM services
            WHERE service_id = $1
            "#,
        )
        .bind(service_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(Service::try_from).transpose()
    }
}

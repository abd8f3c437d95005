use crate::database::{model::pet::PetRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{id::PetId, pet::Pet};
use kernel::repository::pet::PetRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct PetRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl PetRepository for PetRepositoryImpl {
    async fn find_by_id(&self, pet_id: PetId) -> AppResult<Option<Pet>> {
        let row: Option<PetRow> = sqlx::query_as(
            r#"
            SELECT
                pet_id,
                owner_id,
                pet_name,
                breed,
                age,
                vaccines_up_to_date
            FROM pets
            WHERE pet_id = $1
            "#,
        )
        .bind(pet_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Pet::from))
    }
}

use crate::model::{id::PetId, pet::Pet};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait PetRepository: Send + Sync {
    async fn find_by_id(&self, pet_id: PetId) -> AppResult<Option<Pet>>;
}

use crate::model::id::{OwnerId, PetId};

/// A registered pet. Created elsewhere at registration time; this service
/// only ever reads it, primarily for the stored vaccination flag.
#[derive(Debug, Clone)]
pub struct Pet {
    pub pet_id: PetId,
    pub owner_id: OwnerId,
    pub pet_name: String,
    pub breed: Option<String>,
    pub age: Option<i32>,
    pub vaccines_up_to_date: bool,
}

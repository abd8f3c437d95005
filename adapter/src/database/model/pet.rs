use kernel::model::{
    id::{OwnerId, PetId},
    pet::Pet,
};

#[derive(sqlx::FromRow)]
pub struct PetRow {
    pub pet_id: PetId,
    pub owner_id: OwnerId,
    pub pet_name: String,
    pub breed: Option<String>,
    pub age: Option<i32>,
    pub vaccines_up_to_date: bool,
}

impl From<PetRow> for Pet {
    fn from(value: PetRow) -> Self {
        let PetRow {
            pet_id,
            owner_id,
            pet_name,
            breed,
            age,
            vaccines_up_to_date,
        } = value;
        Pet {
            pet_id,
            owner_id,
            pet_name,
            breed,
            age,
            vaccines_up_to_date,
        }
    }
}

//! In-memory collaborators for exercising the booking pipeline without a
//! database. The reservation store enforces the capacity, duplicate and
//! staff rules atomically inside `create`, mirroring the Postgres adapter's
//! in-transaction re-checks.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use http_body_util::BodyExt;
use kernel::model::{
    id::{OwnerId, PetId, ReservationId, ServiceId, StaffId},
    pet::Pet,
    reservation::{event::CreateReservation, PickupOption, Reservation, ReservationStatus},
    service::{Service, ServiceType},
};
use kernel::notifier::ReservationNotifier;
use kernel::repository::{
    health::HealthCheckRepository, pet::PetRepository, reservation::ReservationRepository,
    service::ServiceRepository,
};
use registry::AppRegistry;
use serde_json::{json, Value};
use shared::error::{AppError, AppResult};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

#[derive(Default)]
pub struct InMemoryStore {
    pets: Mutex<HashMap<PetId, Pet>>,
    services: Mutex<HashMap<ServiceId, Service>>,
    reservations: Mutex<Vec<Reservation>>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn add_pet(&self, pet: Pet) -> PetId {
        let pet_id = pet.pet_id;
        self.pets.lock().unwrap().insert(pet_id, pet);
        pet_id
    }

    pub fn add_service(&self, service: Service) -> ServiceId {
        let service_id = service.service_id;
        self.services.lock().unwrap().insert(service_id, service);
        service_id
    }

    pub fn seed_confirmed(&self, service: &Service, date: NaiveDate) -> ReservationId {
        let reservation_id = ReservationId::new();
        self.reservations.lock().unwrap().push(Reservation {
            reservation_id,
            service_type: service.service_type,
            service_id: service.service_id,
            date,
            start_time: None,
            end_time: None,
            pet_id: None,
            owner_id: OwnerId::new(),
            staff_id: None,
            owner_name: "Seed Owner".into(),
            phone: "000-0000-0000".into(),
            email: "seed@example.com".into(),
            pet_name: "Seed Pet".into(),
            pickup_option: PickupOption::No,
            pickup_time: None,
            grooming_options: None,
            notes: None,
            status: ReservationStatus::Confirmed,
            created_at: Utc::now(),
        });
        reservation_id
    }

    pub fn reservation_total(&self) -> usize {
        self.reservations.lock().unwrap().len()
    }
}

fn is_active(reservation: &Reservation) -> bool {
    reservation.status != ReservationStatus::Cancelled
}

#[async_trait]
impl PetRepository for InMemoryStore {
    async fn find_by_id(&self, pet_id: PetId) -> AppResult<Option<Pet>> {
        Ok(self.pets.lock().unwrap().get(&pet_id).cloned())
    }
}

#[async_trait]
impl ServiceRepository for InMemoryStore {
    async fn find_all(&self) -> AppResult<Vec<Service>> {
        Ok(self.services.lock().unwrap().values().cloned().collect())
    }

    async fn find_by_id(&self, service_id: ServiceId) -> AppResult<Option<Service>> {
        Ok(self.services.lock().unwrap().get(&service_id).cloned())
    }
}

#[async_trait]
impl ReservationRepository for InMemoryStore {
    async fn create(&self, event: CreateReservation) -> AppResult<Reservation> {
        let capacity = self
            .services
            .lock()
            .unwrap()
            .get(&event.service_id)
            .map(|s| s.capacity)
            .ok_or(AppError::ServiceNotFound)?;

        let mut reservations = self.reservations.lock().unwrap();

        let active = reservations
            .iter()
            .filter(|r| {
                r.service_id == event.service_id && r.date == event.date && is_active(r)
            })
            .count();
        if active as i64 >= i64::from(capacity) {
            return Err(AppError::CapacityExceeded);
        }

        if let Some(pet_id) = event.pet_id {
            let duplicate = reservations.iter().any(|r| {
                r.pet_id == Some(pet_id)
                    && r.service_id == event.service_id
                    && r.date == event.date
                    && is_active(r)
            });
            if duplicate {
                return Err(AppError::DuplicateBooking);
            }
        }

        if let Some(staff_id) = event.staff_id {
            let held = reservations.iter().any(|r| {
                r.staff_id == Some(staff_id)
                    && r.date == event.date
                    && r.start_time == event.start_time
                    && is_active(r)
            });
            if held {
                return Err(AppError::StaffUnavailable);
            }
        }

        let reservation = Reservation {
            reservation_id: ReservationId::new(),
            service_type: event.service_type,
            service_id: event.service_id,
            date: event.date,
            start_time: event.start_time,
            end_time: event.end_time,
            pet_id: event.pet_id,
            owner_id: event.owner_id,
            staff_id: event.staff_id,
            owner_name: event.owner_name,
            phone: event.phone,
            email: event.email,
            pet_name: event.pet_name,
            pickup_option: event.pickup_option,
            pickup_time: event.pickup_time,
            grooming_options: event.grooming_options,
            notes: event.notes,
            status: ReservationStatus::Confirmed,
            created_at: Utc::now(),
        };
        reservations.push(reservation.clone());
        Ok(reservation)
    }

    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Option<Reservation>> {
        Ok(self
            .reservations
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.reservation_id == reservation_id)
            .cloned())
    }

    async fn find_by_owner_id(&self, owner_id: OwnerId) -> AppResult<Vec<Reservation>> {
        Ok(self
            .reservations
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn count_active_on(&self, service_id: ServiceId, date: NaiveDate) -> AppResult<i64> {
        Ok(self
            .reservations
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.service_id == service_id && r.date == date && is_active(r))
            .count() as i64)
    }

    async fn find_active_by_pet_on(
        &self,
        pet_id: PetId,
        service_id: ServiceId,
        date: NaiveDate,
    ) -> AppResult<Option<Reservation>> {
        Ok(self
            .reservations
            .lock()
            .unwrap()
            .iter()
            .find(|r| {
                r.pet_id == Some(pet_id)
                    && r.service_id == service_id
                    && r.date == date
                    && is_active(r)
            })
            .cloned())
    }

    async fn find_active_by_staff_at(
        &self,
        staff_id: StaffId,
        date: NaiveDate,
        start_time: Option<NaiveDateTime>,
    ) -> AppResult<Option<Reservation>> {
        Ok(self
            .reservations
            .lock()
            .unwrap()
            .iter()
            .find(|r| {
                r.staff_id == Some(staff_id)
                    && r.date == date
                    && r.start_time == start_time
                    && is_active(r)
            })
            .cloned())
    }

    async fn cancel(&self, reservation_id: ReservationId) -> AppResult<()> {
        let mut reservations = self.reservations.lock().unwrap();
        match reservations
            .iter_mut()
            .find(|r| r.reservation_id == reservation_id)
        {
            Some(reservation) => {
                reservation.status = ReservationStatus::Cancelled;
                Ok(())
            }
            None => Err(AppError::EntityNotFound(
                "specified reservation not found".into(),
            )),
        }
    }
}

pub struct AlwaysHealthy;

#[async_trait]
impl HealthCheckRepository for AlwaysHealthy {
    async fn check_db(&self) -> bool {
        true
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub confirmations: AtomicUsize,
    pub alerts: AtomicUsize,
    pub fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            ..Self::default()
        })
    }
}

#[async_trait]
impl ReservationNotifier for RecordingNotifier {
    async fn send_confirmation(&self, _reservation: &Reservation) -> AppResult<()> {
        self.confirmations.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(AppError::ExternalServiceError("mail api down".into()));
        }
        Ok(())
    }

    async fn send_operator_alert(&self, _reservation: &Reservation) -> AppResult<()> {
        self.alerts.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(AppError::ExternalServiceError("mail api down".into()));
        }
        Ok(())
    }
}

pub fn app(store: &Arc<InMemoryStore>, notifier: &Arc<RecordingNotifier>) -> Router {
    let registry = AppRegistry::from_parts(
        Arc::new(AlwaysHealthy),
        store.clone(),
        store.clone(),
        store.clone(),
        notifier.clone(),
    );
    crate::route::v1::routes().with_state(registry)
}

/// Drive one request through the router and decode the JSON body, if any.
pub async fn request(
    app: Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let response = app.oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

pub fn daycare_service(capacity: i32) -> Service {
    Service {
        service_id: ServiceId::new(),
        service_name: "Standard day care".into(),
        service_type: ServiceType::Daycare,
        description: "Daytime care with basic training included.".into(),
        price: 3000,
        capacity,
    }
}

pub fn grooming_service(capacity: i32) -> Service {
    Service {
        service_id: ServiceId::new(),
        service_name: "Full-course grooming".into(),
        service_type: ServiceType::Grooming,
        description: "Shampoo, cut, nails and ears.".into(),
        price: 6000,
        capacity,
    }
}

pub fn registered_pet(owner_id: OwnerId, vaccinated: bool) -> Pet {
    Pet {
        pet_id: PetId::new(),
        owner_id,
        pet_name: "Pochi".into(),
        breed: Some("Shiba Inu".into()),
        age: Some(3),
        vaccines_up_to_date: vaccinated,
    }
}

/// A complete, valid booking payload; tests tweak individual fields.
pub fn booking_request(service: &Service, owner_id: OwnerId) -> Value {
    json!({
        "serviceType": service.service_type,
        "serviceId": service.service_id,
        "date": "2026-02-01",
        "ownerId": owner_id,
        "vaccinesUpToDate": true,
        "ownerName": "Taro Test",
        "phone": "090-0000-0000",
        "email": "taro@example.com",
        "petName": "Pochi",
        "pickupOption": "NO",
        "pickupTime": "09:00"
    })
}

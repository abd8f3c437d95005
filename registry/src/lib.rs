use std::sync::Arc;

use adapter::database::ConnectionPool;
use adapter::mailer::MailNotifier;
use adapter::repository::health::HealthCheckRepositoryImpl;
use adapter::repository::pet::PetRepositoryImpl;
use adapter::repository::reservation::ReservationRepositoryImpl;
use adapter::repository::service::ServiceRepositoryImpl;
use kernel::notifier::ReservationNotifier;
use kernel::repository::health::HealthCheckRepository;
use kernel::repository::pet::PetRepository;
use kernel::repository::reservation::ReservationRepository;
use kernel::repository::service::ServiceRepository;
use shared::config::AppConfig;

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    pet_repository: Arc<dyn PetRepository>,
    service_repository: Arc<dyn ServiceRepository>,
    reservation_repository: Arc<dyn ReservationRepository>,
    notifier: Arc<dyn ReservationNotifier>,
}

impl AppRegistry {
    pub fn new(pool: ConnectionPool, app_config: AppConfig) -> Self {
        Self::from_parts(
            Arc::new(HealthCheckRepositoryImpl::new(pool.clone())),
            Arc::new(PetRepositoryImpl::new(pool.clone())),
            Arc::new(ServiceRepositoryImpl::new(pool.clone())),
            Arc::new(ReservationRepositoryImpl::new(pool)),
            Arc::new(MailNotifier::new(app_config.mail)),
        )
    }

    /// Assemble a registry from arbitrary implementations. Production wiring
    /// goes through `new`; tests hand in in-memory stores here.
    pub fn from_parts(
        health_check_repository: Arc<dyn HealthCheckRepository>,
        pet_repository: Arc<dyn PetRepository>,
        service_repository: Arc<dyn ServiceRepository>,
        reservation_repository: Arc<dyn ReservationRepository>,
        notifier: Arc<dyn ReservationNotifier>,
    ) -> Self {
        Self {
            health_check_repository,
            pet_repository,
            service_repository,
            reservation_repository,
            notifier,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn pet_repository(&self) -> Arc<dyn PetRepository> {
        self.pet_repository.clone()
    }

    pub fn service_repository(&self) -> Arc<dyn ServiceRepository> {
        self.service_repository.clone()
    }

    pub fn reservation_repository(&self) -> Arc<dyn ReservationRepository> {
        self.reservation_repository.clone()
    }

    pub fn notifier(&self) -> Arc<dyn ReservationNotifier> {
        self.notifier.clone()
    }
}

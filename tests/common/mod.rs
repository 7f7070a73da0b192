//! Shared test utilities.
//!
//! [`TestWorld`] wires every service over one in-memory store, the way an
//! application would, so integration tests exercise the same foreign keys and
//! uniqueness rules across entities.

pub mod builders;

use ecorota::EcoRotaConfig;
use ecorota::domain::numbering::InMemoryProtocolSequence;
use ecorota::providers::{BcryptHashProvider, JwtTokenProvider};
use ecorota::services::{
    AdministratorService, EcopointService, NeighborhoodService, ProblemReportService,
    RouteService, SubscriberService,
};
use ecorota::storage::{InMemoryStorage, StandardRepository};
use std::sync::Once;

pub type Repo = StandardRepository<InMemoryStorage>;

static INIT_LOGGER: Once = Once::new();

/// Route library logs to the test output when `RUST_LOG` is set.
pub fn init_logging() {
    INIT_LOGGER.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Test configuration: a fixed secret and cheap hashing.
pub fn test_config() -> EcoRotaConfig {
    EcoRotaConfig::default()
        .with_token_secret("integration-test-secret-0123456789")
        .with_hash_cost(4)
}

/// Every service over a single shared store.
pub struct TestWorld {
    pub storage: InMemoryStorage,
    pub sequence: InMemoryProtocolSequence,
    pub administrators: AdministratorService<Repo, BcryptHashProvider, JwtTokenProvider>,
    pub routes: RouteService<Repo>,
    pub neighborhoods: NeighborhoodService<Repo>,
    pub ecopoints: EcopointService<Repo>,
    pub subscribers: SubscriberService<Repo>,
    pub reports: ProblemReportService<Repo, InMemoryProtocolSequence>,
}

impl TestWorld {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: EcoRotaConfig) -> Self {
        init_logging();
        let storage = InMemoryStorage::new();
        let sequence = InMemoryProtocolSequence::new();
        let repository = || StandardRepository::new(storage.clone());

        let administrators = AdministratorService::new(
            repository(),
            BcryptHashProvider::from_config(&config.hashing).expect("valid hashing config"),
            JwtTokenProvider::from_config(&config.token).expect("valid token config"),
        );

        Self {
            administrators,
            routes: RouteService::new(repository()),
            neighborhoods: NeighborhoodService::new(repository()),
            ecopoints: EcopointService::new(repository()),
            subscribers: SubscriberService::new(repository()),
            reports: ProblemReportService::new(repository(), sequence.clone(), config.protocol),
            storage,
            sequence,
        }
    }
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

//! Input builders with valid defaults.
//!
//! Each builder starts from input every service accepts; tests override the one
//! field they care about.

use super::TestWorld;
use ecorota::domain::entities::{Administrator, Neighborhood, Route, Subscriber};
use ecorota::services::{
    CreateAdministratorInput, CreateEcopointInput, CreateNeighborhoodInput, CreateRouteInput,
    RegisterSubscriberInput, ReportProblemInput,
};

pub const ADMIN_PASSWORD: &str = "s3nh@forte!";

pub fn admin_input(email: &str) -> CreateAdministratorInput {
    CreateAdministratorInput {
        name: "Ana Souza".to_string(),
        email: email.to_string(),
        password: ADMIN_PASSWORD.to_string(),
    }
}

pub fn route_input(name: &str, admin_id: u64) -> CreateRouteInput {
    CreateRouteInput {
        name: name.to_string(),
        collection_days: vec!["monday".into(), "wednesday".into(), "friday".into()],
        start_time: "07:00".to_string(),
        end_time: "11:00".to_string(),
        collection_type: "Coleta regular".to_string(),
        admin_id,
    }
}

pub fn neighborhood_input(name: &str, route_id: u64, admin_id: u64) -> CreateNeighborhoodInput {
    CreateNeighborhoodInput {
        name: name.to_string(),
        population_estimate: Some(15_000),
        postal_code: Some("64000-000".to_string()),
        latitude: Some(-5.0892),
        longitude: Some(-42.8019),
        route_id,
        admin_id,
    }
}

pub fn ecopoint_input(name: &str, neighborhood_id: u64, admin_id: u64) -> CreateEcopointInput {
    CreateEcopointInput {
        name: name.to_string(),
        partner_name: Some("Cooperativa Recicla".to_string()),
        accepted_materials: vec!["glass".into(), "paper".into(), "battery".into()],
        latitude: -5.09,
        longitude: -42.80,
        collection_days: vec!["saturday".into()],
        start_time: "08:00".to_string(),
        end_time: "16:00".to_string(),
        neighborhood_id,
        admin_id,
    }
}

pub fn subscriber_input(email: &str, neighborhood_id: u64) -> RegisterSubscriberInput {
    RegisterSubscriberInput {
        email: email.to_string(),
        street: "Rua das Flores".to_string(),
        number: "123".to_string(),
        complement: Some("Casa 2".to_string()),
        postal_code: Some("64000000".to_string()),
        latitude: None,
        longitude: None,
        neighborhood_id,
    }
}

pub fn report_input(subscriber_id: u64) -> ReportProblemInput {
    ReportProblemInput {
        description: "A coleta não passou na rua nesta semana".to_string(),
        problem_type: "Coleta não realizada".to_string(),
        attachments: vec!["https://fotos.ecorota.com/1.jpg".to_string()],
        subscriber_id,
    }
}

/// One of each parent entity, ready for tests that need a subscriber.
pub struct Seeded {
    pub admin: Administrator,
    pub route: Route,
    pub neighborhood: Neighborhood,
    pub subscriber: Subscriber,
}

impl Seeded {
    pub fn admin_id(&self) -> u64 {
        self.admin.id().value()
    }

    pub fn subscriber_id(&self) -> u64 {
        self.subscriber.id().value()
    }
}

pub async fn seed(world: &TestWorld) -> Seeded {
    let admin = world
        .administrators
        .create(admin_input("ana@ecorota.com"))
        .await
        .expect("admin");
    let route = world
        .routes
        .create(route_input("Rota Centro", admin.id().value()))
        .await
        .expect("route");
    let neighborhood = world
        .neighborhoods
        .create(neighborhood_input(
            "Centro",
            route.id().value(),
            admin.id().value(),
        ))
        .await
        .expect("neighborhood");
    let subscriber = world
        .subscribers
        .subscribe(subscriber_input(
            "morador@ecorota.com",
            neighborhood.id().value(),
        ))
        .await
        .expect("subscriber");

    Seeded {
        admin,
        route,
        neighborhood,
        subscriber,
    }
}

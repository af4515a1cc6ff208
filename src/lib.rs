pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod form;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use crate::config::Config;
use crate::services::{
    auth_service::AuthService, cv_service::CvService, cv_store::CvStore, user_store::UserStore,
};

#[derive(Clone)]
pub struct AppState {
    pub cv_service: CvService,
    pub auth_service: AuthService,
    pub jwt_secret: Arc<str>,
}

impl AppState {
    pub fn new(config: &Config, cv_store: Arc<dyn CvStore>, user_store: Arc<dyn UserStore>) -> Self {
        let jwt_secret: Arc<str> = Arc::from(config.jwt_secret.as_str());

        let cv_service = CvService::new(cv_store);
        let auth_service =
            AuthService::new(user_store, jwt_secret.clone(), config.jwt_ttl_hours);

        Self {
            cv_service,
            auth_service,
            jwt_secret,
        }
    }
}

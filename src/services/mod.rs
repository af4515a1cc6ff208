pub mod auth_service;
pub mod cv_service;
pub mod cv_store;
pub mod user_store;

pub mod auth_dto;
pub mod cv_dto;

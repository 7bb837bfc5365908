pub mod error;
pub mod split_job;
pub mod split_service;

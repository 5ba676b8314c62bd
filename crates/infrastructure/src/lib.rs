//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod argon2_password_hasher;
mod gemini_text_generator;
mod postgres_assignment_repository;
mod postgres_availability_repository;
mod postgres_ministry_repository;
mod postgres_profile_repository;
mod postgres_schedule_repository;
mod postgres_service_time_repository;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use gemini_text_generator::{GeminiConfig, GeminiTextGenerator};
pub use postgres_assignment_repository::PostgresAssignmentRepository;
pub use postgres_availability_repository::PostgresAvailabilityRepository;
pub use postgres_ministry_repository::PostgresMinistryRepository;
pub use postgres_profile_repository::PostgresProfileRepository;
pub use postgres_schedule_repository::PostgresScheduleRepository;
pub use postgres_service_time_repository::PostgresServiceTimeRepository;

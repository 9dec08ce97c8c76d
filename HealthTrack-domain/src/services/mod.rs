pub mod activities;
pub mod blood_tests;
pub mod health_score;
pub mod sleep;
pub mod users;

// Domain services
// This module contains business logic implementations.

// Re-export service traits and factory functions
pub use activities::{create_activity_service, ActivityServiceTrait};
pub use blood_tests::{create_blood_test_service, BloodTestServiceTrait};
pub use health_score::{create_health_score_service, HealthScoreServiceTrait};
pub use sleep::{create_sleep_service, SleepServiceTrait};
pub use users::{create_user_service, UserServiceTrait};

/// Flatten validator output into one readable message
pub(crate) fn validation_message(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .iter()
        .map(|(field, errors)| {
            let messages: Vec<String> = errors
                .iter()
                .map(|err| {
                    err.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid {field}"))
                })
                .collect();
            format!("{}: {}", field, messages.join(", "))
        })
        .collect::<Vec<String>>()
        .join("; ")
}

//! Domain layer health check functionality
//! This module provides health check services for the application

use async_trait::async_trait;
use std::collections::HashMap;

use health_track_data::database::Database;

/// System health status
#[derive(Debug, Clone, PartialEq)]
pub enum SystemStatus {
    /// All components are healthy
    Healthy,
    /// Some components are degraded but the system is functional
    Degraded,
    /// System is not functioning properly
    Unhealthy,
}

/// Component health status
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentStatus {
    /// Component is functioning normally
    Healthy,
    /// Component is functioning but with reduced performance
    Degraded,
    /// Component is not functioning
    Unhealthy,
}

/// Represents a health component with status and optional details
#[derive(Debug, Clone)]
pub struct HealthComponent {
    /// Status of the component
    pub status: ComponentStatus,
    /// Optional details about the component status
    pub details: Option<String>,
}

/// Represents the overall health of the system
#[derive(Debug, Clone)]
pub struct SystemHealth {
    /// Overall system status
    pub status: SystemStatus,
    /// Map of component names to their health status
    pub components: HashMap<String, HealthComponent>,
}

/// Trait for health services
#[async_trait]
pub trait HealthServiceTrait: Send + Sync + std::fmt::Debug {
    /// Get the overall system health
    async fn get_system_health(&self) -> SystemHealth;

    /// Check the status of the database.
    /// Returns an error message if the check could not be performed.
    async fn check_database_status(&self) -> Result<bool, String>;
}

/// Check whether the given database answers queries
pub async fn check_database_status(db: &Database) -> Result<bool, String> {
    match db.ping() {
        Ok(()) => Ok(true),
        Err(e) => Err(format!("Database connection error: {e}")),
    }
}

/// Get overall system health for the given database handle
pub async fn get_system_health(db: &Database) -> SystemHealth {
    let db_component = match check_database_status(db).await {
        Ok(true) => HealthComponent {
            status: ComponentStatus::Healthy,
            details: None,
        },
        Ok(false) => HealthComponent {
            status: ComponentStatus::Degraded,
            details: Some("Database is available but has performance issues".to_string()),
        },
        Err(e) => HealthComponent {
            status: ComponentStatus::Unhealthy,
            details: Some(e),
        },
    };

    let overall_status = if db_component.status == ComponentStatus::Unhealthy {
        SystemStatus::Unhealthy
    } else if db_component.status == ComponentStatus::Degraded {
        SystemStatus::Degraded
    } else {
        SystemStatus::Healthy
    };

    SystemHealth {
        status: overall_status,
        components: vec![("database".to_string(), db_component)]
            .into_iter()
            .collect(),
    }
}

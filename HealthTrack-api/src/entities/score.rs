use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Human-readable label for what an observation measures
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ObservationCode {
    /// Plain-text description of the observation
    pub text: String,
}

/// Reference to the subject an observation is about
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubjectReference {
    /// Relative reference, e.g. `User/<id>`
    pub reference: String,
}

/// A measured quantity with its unit coding
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ValueQuantity {
    /// Numeric value of the measurement
    pub value: f64,

    /// Human-readable unit
    pub unit: String,

    /// Identity of the coding system the unit code comes from
    pub system: String,

    /// Unit code within the coding system
    pub code: String,
}

/// FHIR-style Observation resource carrying a computed health score
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthScoreObservation {
    /// Always `"Observation"`
    pub resource_type: String,

    /// Stable identifier derived from the subject
    pub id: String,

    /// Lifecycle status of the observation (`"final"`)
    pub status: String,

    /// What this observation measures
    pub code: ObservationCode,

    /// The subject the observation is about
    pub subject: SubjectReference,

    /// The measured value and its unit coding
    pub value_quantity: ValueQuantity,
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status of an observation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ObservationStatus {
    /// The observation is complete and verified
    Final,
}

/// Human-readable label for what an observation measures
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ObservationCode {
    /// Plain-text description of the observation
    pub text: String,
}

/// Reference to the subject an observation is about
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubjectReference {
    /// Relative reference, e.g. `User/<id>`
    pub reference: String,
}

/// A measured quantity with its unit coding
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
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
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    /// Always `"Observation"`
    pub resource_type: String,

    /// Stable identifier derived from the subject
    pub id: String,

    /// Lifecycle status of the observation
    pub status: ObservationStatus,

    /// What this observation measures
    pub code: ObservationCode,

    /// The subject the observation is about
    pub subject: SubjectReference,

    /// The measured value and its unit coding
    pub value_quantity: ValueQuantity,
}

impl Observation {
    /// Build the health-score observation for a user.
    ///
    /// The unit is coded as a UCUM percentage so downstream consumers can
    /// interpret the value without parsing the free-text unit.
    pub fn health_score(user_id: Uuid, score: f64) -> Self {
        Self {
            resource_type: "Observation".to_string(),
            id: format!("healthscore-{user_id}"),
            status: ObservationStatus::Final,
            code: ObservationCode {
                text: "Health Score".to_string(),
            },
            subject: SubjectReference {
                reference: format!("User/{user_id}"),
            },
            value_quantity: ValueQuantity {
                value: score,
                unit: "percent".to_string(),
                system: "http://unitsofmeasure.org".to_string(),
                code: "%".to_string(),
            },
        }
    }
}

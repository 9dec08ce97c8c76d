//! Health score aggregation.
//!
//! Three heterogeneous signals (activity volume, sleep duration, blood-test
//! results) are normalized onto a common 0–100 scale with different shaping
//! functions, averaged without weights, and emitted as a FHIR-style
//! Observation. The scoring functions are pure; the service wraps them with
//! subject resolution and data loading.

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::entities::activity::ActivitySession;
use crate::entities::blood_test::BloodTest;
use crate::entities::conversions;
use crate::entities::observation::Observation;
use crate::entities::sleep::SleepSession;
use health_track_data::database::Database;
use health_track_data::repository::{
    ActivityRepositoryTrait, BloodTestRepositoryTrait, RepositoryError, SleepRepositoryTrait,
    SqliteActivityRepository, SqliteBloodTestRepository, SqliteSleepRepository,
    SqliteUserRepository, UserRepositoryTrait,
};

/// Weekly activity target in minutes (WHO guideline for adults)
pub const TARGET_WEEKLY_ACTIVITY_MINUTES: f64 = 150.0;

/// Lower bound of the healthy sleep band, in minutes (7 hours)
pub const RECOMMENDED_SLEEP_MIN_MINUTES: f64 = 420.0;

/// Upper bound of the healthy sleep band, in minutes (9 hours)
pub const RECOMMENDED_SLEEP_MAX_MINUTES: f64 = 540.0;

/// Reference range for a blood test with a known healthy band.
///
/// Names are matched exactly. Tests not listed here score 100: an unknown
/// test is treated as optimal by policy rather than excluded from the mean
/// or treated as a failure.
fn reference_range(test_name: &str) -> Option<(f64, f64)> {
    match test_name {
        "glucose" => Some((70.0, 100.0)),
        "cholesterol" => Some((125.0, 200.0)),
        "vitamin D" => Some((20.0, 50.0)),
        _ => None,
    }
}

/// Activity sub-score: total session minutes over the weekly target, scaled
/// to a percentage and capped at 100. No sessions scores 0.
pub fn activity_score(sessions: &[ActivitySession]) -> f64 {
    if sessions.is_empty() {
        return 0.0;
    }
    let total: f64 = sessions.iter().map(|s| s.duration_minutes).sum();
    (total / TARGET_WEEKLY_ACTIVITY_MINUTES * 100.0).min(100.0)
}

/// Sleep sub-score: piecewise function of the mean session duration `m`.
///
/// - below the band: linear ramp from 0 at no sleep to 50 at the lower bound
/// - inside the band (inclusive): 100
/// - above the band: starts at 100 just past the upper bound and decays
///   linearly with the excess, clamped to [0, 100]
///
/// No sessions scores 0.
pub fn sleep_score(sessions: &[SleepSession]) -> f64 {
    if sessions.is_empty() {
        return 0.0;
    }
    let mean = sessions.iter().map(|s| s.duration_minutes as f64).sum::<f64>()
        / sessions.len() as f64;

    if mean < RECOMMENDED_SLEEP_MIN_MINUTES {
        mean / RECOMMENDED_SLEEP_MIN_MINUTES * 50.0
    } else if mean > RECOMMENDED_SLEEP_MAX_MINUTES {
        let excess = mean - RECOMMENDED_SLEEP_MAX_MINUTES;
        let score = 50.0
            + ((RECOMMENDED_SLEEP_MAX_MINUTES - excess) / RECOMMENDED_SLEEP_MAX_MINUTES) * 50.0;
        score.clamp(0.0, 100.0)
    } else {
        100.0
    }
}

/// Score a single result against its reference range.
///
/// Values inside the range (bounds inclusive) score 100; outside it the
/// score decays linearly with the absolute distance from the range midpoint,
/// normalized by half the range width, and is floored at 0.
pub fn single_blood_test_score(value: f64, min_val: f64, max_val: f64) -> f64 {
    if (min_val..=max_val).contains(&value) {
        return 100.0;
    }
    let mid = (min_val + max_val) / 2.0;
    (100.0 - (value - mid).abs() / ((max_val - min_val) / 2.0) * 100.0).max(0.0)
}

/// Blood-test sub-score: mean of the per-result scores. No results scores 0.
pub fn blood_test_score(tests: &[BloodTest]) -> f64 {
    if tests.is_empty() {
        return 0.0;
    }
    let sum: f64 = tests
        .iter()
        .map(|test| match reference_range(&test.test_name) {
            Some((lo, hi)) => single_blood_test_score(test.result, lo, hi),
            None => 100.0,
        })
        .sum();
    sum / tests.len() as f64
}

/// Composite score: unweighted mean of the three sub-scores, rounded to two
/// decimals. Each signal counts once no matter how many records back it.
pub fn composite_score(activity: f64, sleep: f64, blood: f64) -> f64 {
    let overall = (activity + sleep + blood) / 3.0;
    (overall * 100.0).round() / 100.0
}

/// Health score service errors
#[derive(Debug, Error)]
pub enum HealthScoreServiceError {
    /// Not found error
    #[error("User not found: {0}")]
    NotFound(String),

    /// Repository error
    #[error("Repository error: {0}")]
    Repository(String),
}

/// Trait for health score operations
#[async_trait]
pub trait HealthScoreServiceTrait {
    /// Compute the health score observation for a user.
    /// Fails with `NotFound` before any scoring if the user does not exist.
    async fn health_score_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Observation, HealthScoreServiceError>;
}

/// Health score service wiring the pure scoring functions to the repositories
pub struct HealthScoreService<U, A, S, B> {
    users: U,
    activities: A,
    sleep: S,
    blood_tests: B,
}

impl<U, A, S, B> HealthScoreService<U, A, S, B>
where
    U: UserRepositoryTrait,
    A: ActivityRepositoryTrait,
    S: SleepRepositoryTrait,
    B: BloodTestRepositoryTrait,
{
    /// Create a new health score service over the four repositories
    pub fn new(users: U, activities: A, sleep: S, blood_tests: B) -> Self {
        Self {
            users,
            activities,
            sleep,
            blood_tests,
        }
    }

    fn map_repo_error(err: RepositoryError) -> HealthScoreServiceError {
        match err {
            RepositoryError::NotFound(msg) => HealthScoreServiceError::NotFound(msg),
            _ => HealthScoreServiceError::Repository(err.to_string()),
        }
    }
}

#[async_trait]
impl<U, A, S, B> HealthScoreServiceTrait for HealthScoreService<U, A, S, B>
where
    U: UserRepositoryTrait + Send + Sync,
    A: ActivityRepositoryTrait + Send + Sync,
    S: SleepRepositoryTrait + Send + Sync,
    B: BloodTestRepositoryTrait + Send + Sync,
{
    async fn health_score_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Observation, HealthScoreServiceError> {
        // The subject must resolve before anything is computed.
        self.users
            .get_by_id(user_id)
            .await
            .map_err(Self::map_repo_error)?
            .ok_or_else(|| HealthScoreServiceError::NotFound(format!("User {user_id} not found")))?;

        let activities: Vec<ActivitySession> = self
            .activities
            .get_by_user(user_id)
            .await
            .map_err(Self::map_repo_error)?
            .into_iter()
            .map(conversions::convert_to_domain_activity)
            .collect();

        let sleep_sessions: Vec<SleepSession> = self
            .sleep
            .get_by_user(user_id)
            .await
            .map_err(Self::map_repo_error)?
            .into_iter()
            .map(conversions::convert_to_domain_sleep)
            .collect();

        let blood_tests: Vec<BloodTest> = self
            .blood_tests
            .get_by_user(user_id)
            .await
            .map_err(Self::map_repo_error)?
            .into_iter()
            .map(conversions::convert_to_domain_blood_test)
            .collect();

        let activity = activity_score(&activities);
        let sleep = sleep_score(&sleep_sessions);
        let blood = blood_test_score(&blood_tests);
        let score = composite_score(activity, sleep, blood);

        debug!(
            "Health score for user {}: activity={:.2}, sleep={:.2}, blood={:.2}, composite={}",
            user_id, activity, sleep, blood, score
        );

        Ok(Observation::health_score(user_id, score))
    }
}

/// Create a health score service backed by the SQLite repositories
pub fn create_health_score_service(db: &Database) -> impl HealthScoreServiceTrait + Send + Sync {
    HealthScoreService::new(
        SqliteUserRepository::new(db.clone()),
        SqliteActivityRepository::new(db.clone()),
        SqliteSleepRepository::new(db.clone()),
        SqliteBloodTestRepository::new(db.clone()),
    )
}

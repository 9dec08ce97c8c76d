//! Conversion functions between domain entities and data models.
//! These follow the pattern `convert_to_[target_layer]_[model_name]`.

use crate::entities::activity::{ActivitySession, CreateActivityRequest};
use crate::entities::blood_test::{BloodTest, CreateBloodTestRequest};
use crate::entities::sleep::{CreateSleepRequest, SleepSession};
use crate::entities::user::{CreateUserRequest, User};

/// Convert from data model to domain entity for a user
pub fn convert_to_domain_user(data_user: health_track_data::models::user::User) -> User {
    User {
        id: data_user.id,
        username: data_user.username,
        email: data_user.email,
        created_at: data_user.created_at,
    }
}

/// Convert from domain entity to data model for a user create request
pub fn convert_to_data_create_user(
    domain_request: &CreateUserRequest,
) -> health_track_data::models::user::CreateUserRequest {
    health_track_data::models::user::CreateUserRequest {
        username: domain_request.username.clone(),
        email: domain_request.email.clone(),
    }
}

/// Convert from domain entity to data model for a user
pub fn convert_to_data_user(domain_user: &User) -> health_track_data::models::user::User {
    health_track_data::models::user::User {
        id: domain_user.id,
        username: domain_user.username.clone(),
        email: domain_user.email.clone(),
        created_at: domain_user.created_at,
    }
}

/// Convert from data model to domain entity for an activity session
pub fn convert_to_domain_activity(
    data_session: health_track_data::models::activity::ActivitySession,
) -> ActivitySession {
    ActivitySession {
        id: data_session.id,
        user_id: data_session.user_id,
        activity_type: data_session.activity_type,
        duration_minutes: data_session.duration_minutes,
        timestamp: data_session.timestamp,
    }
}

/// Convert from domain entity to data model for an activity create request
pub fn convert_to_data_create_activity(
    domain_request: &CreateActivityRequest,
) -> health_track_data::models::activity::CreateActivityRequest {
    health_track_data::models::activity::CreateActivityRequest {
        activity_type: domain_request.activity_type.clone(),
        duration_minutes: domain_request.duration_minutes,
    }
}

/// Convert from domain entity to data model for an activity session
pub fn convert_to_data_activity(
    domain_session: &ActivitySession,
) -> health_track_data::models::activity::ActivitySession {
    health_track_data::models::activity::ActivitySession {
        id: domain_session.id,
        user_id: domain_session.user_id,
        activity_type: domain_session.activity_type.clone(),
        duration_minutes: domain_session.duration_minutes,
        timestamp: domain_session.timestamp,
    }
}

/// Convert from data model to domain entity for a sleep session
pub fn convert_to_domain_sleep(
    data_session: health_track_data::models::sleep::SleepSession,
) -> SleepSession {
    SleepSession {
        id: data_session.id,
        user_id: data_session.user_id,
        start_time: data_session.start_time,
        end_time: data_session.end_time,
        duration_minutes: data_session.duration_minutes,
        quality: data_session.quality,
        timestamp: data_session.timestamp,
    }
}

/// Convert from domain entity to data model for a sleep create request.
/// The derived duration is supplied by the caller (the sleep service), which
/// is the only place it is computed.
pub fn convert_to_data_create_sleep(
    domain_request: &CreateSleepRequest,
    duration_minutes: i64,
) -> health_track_data::models::sleep::CreateSleepRequest {
    health_track_data::models::sleep::CreateSleepRequest {
        start_time: domain_request.start_time,
        end_time: domain_request.end_time,
        duration_minutes,
        quality: domain_request.quality.clone(),
    }
}

/// Convert from domain entity to data model for a sleep session
pub fn convert_to_data_sleep(
    domain_session: &SleepSession,
) -> health_track_data::models::sleep::SleepSession {
    health_track_data::models::sleep::SleepSession {
        id: domain_session.id,
        user_id: domain_session.user_id,
        start_time: domain_session.start_time,
        end_time: domain_session.end_time,
        duration_minutes: domain_session.duration_minutes,
        quality: domain_session.quality.clone(),
        timestamp: domain_session.timestamp,
    }
}

/// Convert from data model to domain entity for a blood-test result
pub fn convert_to_domain_blood_test(
    data_test: health_track_data::models::blood_test::BloodTest,
) -> BloodTest {
    BloodTest {
        id: data_test.id,
        user_id: data_test.user_id,
        test_name: data_test.test_name,
        result: data_test.result,
        unit: data_test.unit,
        timestamp: data_test.timestamp,
    }
}

/// Convert from domain entity to data model for a blood-test create request
pub fn convert_to_data_create_blood_test(
    domain_request: &CreateBloodTestRequest,
) -> health_track_data::models::blood_test::CreateBloodTestRequest {
    health_track_data::models::blood_test::CreateBloodTestRequest {
        test_name: domain_request.test_name.clone(),
        result: domain_request.result,
        unit: domain_request.unit.clone(),
    }
}

/// Convert from domain entity to data model for a blood-test result
pub fn convert_to_data_blood_test(
    domain_test: &BloodTest,
) -> health_track_data::models::blood_test::BloodTest {
    health_track_data::models::blood_test::BloodTest {
        id: domain_test.id,
        user_id: domain_test.user_id,
        test_name: domain_test.test_name.clone(),
        result: domain_test.result,
        unit: domain_test.unit.clone(),
        timestamp: domain_test.timestamp,
    }
}

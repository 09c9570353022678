use std::sync::LazyLock;

use chrono::Utc;
use rand_distr::{Distribution, Uniform};
use tracing::{debug, info, warn};

use crate::error::{MaintenanceError, Result};
use crate::modules::course::crud::CourseCrud;
use crate::modules::course::model::CourseSubject;
use crate::modules::fields;
use crate::modules::migration::schema::{
    CourseReport, MigrateAllReport, SubjectStatusReport, SubjectsReport, UserCoursesReport,
};
use crate::modules::subject::crud::SubjectCrud;
use crate::modules::subject::model::Subject;
use crate::modules::subject_status::crud::SubjectStatusCrud;
use crate::modules::user::crud::UserCrud;
use crate::modules::user::model;
use crate::AppState;

/// Legacy enrolments are back-dated by up to this many days.
const MAX_REGISTRATION_OFFSET_DAYS: i64 = 180;

static REGISTRATION_OFFSET: LazyLock<Uniform<i64>> = LazyLock::new(|| {
    Uniform::new_inclusive(1, MAX_REGISTRATION_OFFSET_DAYS)
        .expect("registration offset window is a non-empty constant range")
});

/// Uniform in 1..=MAX_REGISTRATION_OFFSET_DAYS.
pub fn registration_offset_days() -> i64 {
    let mut rng = rand::rng();
    REGISTRATION_OFFSET.sample(&mut rng)
}

/// Adds registration and expiration dates to every user's course enrolments.
pub async fn migrate_user_course_dates(state: &AppState) -> Result<UserCoursesReport> {
    let users = UserCrud::new(&state.db);
    let today = Utc::now().date_naive();
    let mut report = UserCoursesReport {
        dry_run: state.dry_run,
        ..Default::default()
    };

    for user in users.find_all_courses().await? {
        report.users_scanned += 1;

        let courses = fields::documents(&user, "courses", "users")?;
        let (updated, dated) = model::date_courses(&courses, today, registration_offset_days)?;
        if dated == 0 {
            continue;
        }

        let id = user
            .get("_id")
            .cloned()
            .ok_or_else(|| MaintenanceError::malformed("users", "missing _id"))?;

        debug!(user_id = %id, courses_dated = dated, "Dating user courses");
        if !state.dry_run {
            users.set_courses(&id, &updated).await?;
        }
        report.users_updated += 1;
        report.courses_dated += dated as u64;
    }

    info!(
        users_scanned = report.users_scanned,
        users_updated = report.users_updated,
        courses_dated = report.courses_dated,
        dry_run = state.dry_run,
        "User course dates migrated"
    );

    Ok(report)
}

/// Copies the subjects embedded in a course into the `subjects` collection.
/// Must run before [`migrate_course_active_and_relevance`], which drops the
/// subject and topic names.
pub async fn migrate_subjects(state: &AppState, course_id: &str) -> Result<SubjectsReport> {
    let course_id = fields::parse_uuid(course_id)?;
    let course = CourseCrud::new(&state.db)
        .find_by_id(&course_id)
        .await?
        .ok_or_else(|| MaintenanceError::CourseNotFound(course_id.clone()))?;

    // Reshaped entries carry `id` instead of `_id` and no longer have names.
    let embedded = fields::documents(&course, "subjects", "courses")?;
    let found = embedded.len();
    let (legacy, reshaped): (Vec<_>, Vec<_>) =
        embedded.into_iter().partition(|s| s.contains_key("_id"));
    if !reshaped.is_empty() {
        warn!(
            course_id = %course_id,
            count = reshaped.len(),
            "Skipping already reshaped course subjects"
        );
    }

    let now = bson::DateTime::now();
    let candidates = legacy
        .into_iter()
        .map(|s| Subject::from_course_subject(s, now))
        .collect::<Result<Vec<_>>>()?;

    let catalogue = SubjectCrud::new(&state.db);
    let ids: Vec<String> = candidates.iter().map(|s| s.id.clone()).collect();
    let existing = catalogue.existing_ids(&ids).await?;

    let fresh: Vec<Subject> = candidates
        .into_iter()
        .filter(|s| !existing.contains(&s.id))
        .collect();
    let pending = fresh.len();

    let inserted = if state.dry_run {
        pending
    } else {
        catalogue.insert_many(fresh).await?
    };

    info!(
        course_id = %course_id,
        found,
        inserted,
        skipped = found - pending,
        dry_run = state.dry_run,
        "Subjects migrated"
    );

    Ok(SubjectsReport {
        course_id,
        found,
        inserted,
        skipped: found - pending,
        dry_run: state.dry_run,
    })
}

/// Rewrites a course's subjects into the `{id, relevance, active, topics}`
/// shape, with every subject and topic active and every task type enabled.
pub async fn migrate_course_active_and_relevance(
    state: &AppState,
    course_id: &str,
) -> Result<CourseReport> {
    let course_id = fields::parse_uuid(course_id)?;
    let courses = CourseCrud::new(&state.db);
    let course = courses
        .find_by_id(&course_id)
        .await?
        .ok_or_else(|| MaintenanceError::CourseNotFound(course_id.clone()))?;

    let subjects = fields::documents(&course, "subjects", "courses")?
        .into_iter()
        .map(CourseSubject::from_legacy)
        .collect::<Result<Vec<_>>>()?;
    let topics = subjects.iter().map(|s| s.topics.len()).sum();

    let modified = if state.dry_run {
        false
    } else {
        courses.set_subjects(&course_id, &subjects).await?
    };

    info!(
        course_id = %course_id,
        subjects = subjects.len(),
        topics,
        modified,
        dry_run = state.dry_run,
        "Course subjects reshaped"
    );

    Ok(CourseReport {
        course_id,
        subjects: subjects.len(),
        topics,
        modified,
        dry_run: state.dry_run,
    })
}

/// Resets every subject-status record of a course to empty hits/misses and
/// customizations, dropping the legacy subject arrays.
pub async fn migrate_user_subject_status_customizations(
    state: &AppState,
    course_id: &str,
) -> Result<SubjectStatusReport> {
    let course_id = fields::parse_uuid(course_id)?;
    let statuses = SubjectStatusCrud::new(&state.db);

    let (matched, modified) = if state.dry_run {
        (statuses.count_for_course(&course_id).await?, 0)
    } else {
        statuses.reset_customizations(&course_id).await?
    };

    info!(
        course_id = %course_id,
        matched,
        modified,
        dry_run = state.dry_run,
        "Subject status migrated"
    );

    Ok(SubjectStatusReport {
        course_id,
        matched,
        modified,
        dry_run: state.dry_run,
    })
}

/// Runs every migration in dependency order.
pub async fn migrate_all(state: &AppState, course_id: &str) -> Result<MigrateAllReport> {
    let subjects = migrate_subjects(state, course_id).await?;
    let course = migrate_course_active_and_relevance(state, course_id).await?;
    let subject_status = migrate_user_subject_status_customizations(state, course_id).await?;
    let user_courses = migrate_user_course_dates(state).await?;

    Ok(MigrateAllReport {
        subjects,
        course,
        subject_status,
        user_courses,
    })
}

use bson::Document;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::modules::fields;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const ENROLMENT_DAYS: i64 = 365;

const COLLECTION: &str = "users";

/// A course enrolment as stored on the user document.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserCourse {
    pub id: String,
    pub registration_date: String,
    pub expiration_date: String,
}

impl UserCourse {
    pub fn enrolled(id: String, registration: NaiveDate) -> Self {
        let expiration = registration + Duration::days(ENROLMENT_DAYS);
        Self {
            id,
            registration_date: registration.format(DATE_FORMAT).to_string(),
            expiration_date: expiration.format(DATE_FORMAT).to_string(),
        }
    }

    /// Reads a stored enrolment. Returns `Ok(None)` when it predates the
    /// registration/expiration dates.
    pub fn from_stored(doc: &Document) -> Result<Option<Self>> {
        let id = fields::string(doc, "id", COLLECTION)?;
        match (doc.get_str("registrationDate"), doc.get_str("expirationDate")) {
            (Ok(registration), Ok(expiration)) => Ok(Some(Self {
                id,
                registration_date: registration.to_string(),
                expiration_date: expiration.to_string(),
            })),
            _ => Ok(None),
        }
    }
}

/// Gives every undated enrolment a registration date `offset()` days before
/// `today`. Already-dated enrolments are kept. Returns the new list and how
/// many entries were dated.
pub fn date_courses(
    courses: &[&Document],
    today: NaiveDate,
    mut offset: impl FnMut() -> i64,
) -> Result<(Vec<UserCourse>, usize)> {
    let mut dated = 0;
    let mut updated = Vec::with_capacity(courses.len());

    for course in courses {
        match UserCourse::from_stored(course)? {
            Some(existing) => updated.push(existing),
            None => {
                let id = fields::string(course, "id", COLLECTION)?;
                let registration = today - Duration::days(offset());
                updated.push(UserCourse::enrolled(id, registration));
                dated += 1;
            }
        }
    }

    Ok((updated, dated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_enrolled_expires_after_a_year() {
        let c = UserCourse::enrolled("c1".to_string(), day("2024-03-01"));
        assert_eq!(c.registration_date, "2024-03-01");
        // 2024 is a leap year
        assert_eq!(c.expiration_date, "2025-03-01");
    }

    #[test]
    fn test_date_courses_only_touches_undated_entries() {
        let legacy = doc! { "id": "c1" };
        let dated = doc! {
            "id": "c2",
            "registrationDate": "2023-01-01",
            "expirationDate": "2024-01-01",
        };
        let courses = vec![&legacy, &dated];

        let (updated, count) = date_courses(&courses, day("2024-06-30"), || 30).unwrap();

        assert_eq!(count, 1);
        assert_eq!(updated[0].id, "c1");
        assert_eq!(updated[0].registration_date, "2024-05-31");
        assert_eq!(updated[0].expiration_date, "2025-05-31");
        assert_eq!(updated[1].registration_date, "2023-01-01");
    }

    #[test]
    fn test_date_courses_drops_unknown_fields() {
        let legacy = doc! { "id": "c1", "progress": 12 };
        let (updated, _) = date_courses(&[&legacy], day("2024-01-10"), || 1).unwrap();
        let stored = bson::to_document(&updated[0]).unwrap();
        assert_eq!(
            stored.keys().collect::<Vec<_>>(),
            vec!["id", "registrationDate", "expirationDate"]
        );
    }

    #[test]
    fn test_date_courses_requires_course_id() {
        let broken = doc! { "name": "no id" };
        assert!(date_courses(&[&broken], day("2024-01-10"), || 1).is_err());
    }
}

use serde::Serialize;

#[derive(Debug, Serialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserCoursesReport {
    pub users_scanned: u64,
    pub users_updated: u64,
    pub courses_dated: u64,
    pub dry_run: bool,
}

#[derive(Debug, Serialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubjectsReport {
    pub course_id: String,
    pub found: usize,
    pub inserted: usize,
    /// Already present in the catalogue from an earlier run.
    pub skipped: usize,
    pub dry_run: bool,
}

#[derive(Debug, Serialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CourseReport {
    pub course_id: String,
    pub subjects: usize,
    pub topics: usize,
    pub modified: bool,
    pub dry_run: bool,
}

#[derive(Debug, Serialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubjectStatusReport {
    pub course_id: String,
    pub matched: u64,
    pub modified: u64,
    pub dry_run: bool,
}

#[derive(Debug, Serialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MigrateAllReport {
    pub subjects: SubjectsReport,
    pub course: CourseReport,
    pub subject_status: SubjectStatusReport,
    pub user_courses: UserCoursesReport,
}

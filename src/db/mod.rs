pub mod repository;
pub mod store;

pub use repository::{
    EnrollmentRepository, JsonRepository, ProfileRepository, SubmissionRepository,
    ENROLLMENT_KEY, PROFILE_KEY, SUBMISSIONS_KEY,
};
pub use store::{MemoryRecordStore, RecordStore, SqliteRecordStore};

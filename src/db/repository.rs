use std::sync::Arc;

use serde::{Serialize, de::DeserializeOwned};
use tracing::warn;

use crate::catalog::sample_student;
use crate::db::store::RecordStore;
use crate::error::AppError;
use crate::models::{AssignmentSubmission, EnrollmentEntry, Student};

pub const PROFILE_KEY: &str = "edu_profile";
pub const ENROLLMENT_KEY: &str = "edu_enrolled_blocks";
pub const SUBMISSIONS_KEY: &str = "edu_submissions";

/// Typed, write-through view over one key of a [`RecordStore`].
///
/// `load` never fails on bad data: an absent or malformed record yields the
/// repository default. Only backend errors propagate.
pub struct JsonRepository<T> {
    store: Arc<dyn RecordStore>,
    key: &'static str,
    default: fn() -> T,
}

impl<T> JsonRepository<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(store: Arc<dyn RecordStore>, key: &'static str, default: fn() -> T) -> Self {
        Self {
            store,
            key,
            default,
        }
    }

    pub async fn load(&self) -> Result<T, AppError> {
        let Some(raw) = self.store.load(self.key).await? else {
            return Ok((self.default)());
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!("malformed record {}, using default: {}", self.key, e);
                Ok((self.default)())
            }
        }
    }

    pub async fn save(&self, value: &T) -> Result<(), AppError> {
        let raw = serde_json::to_string(value)?;
        self.store.save(self.key, &raw).await
    }
}

pub type ProfileRepository = JsonRepository<Student>;
pub type EnrollmentRepository = JsonRepository<Vec<EnrollmentEntry>>;
pub type SubmissionRepository = JsonRepository<Vec<AssignmentSubmission>>;

impl ProfileRepository {
    pub fn profile(store: Arc<dyn RecordStore>) -> Self {
        Self::new(store, PROFILE_KEY, sample_student)
    }
}

impl EnrollmentRepository {
    pub fn enrollment(store: Arc<dyn RecordStore>) -> Self {
        Self::new(store, ENROLLMENT_KEY, Vec::new)
    }
}

impl SubmissionRepository {
    pub fn submissions(store: Arc<dyn RecordStore>) -> Self {
        Self::new(store, SUBMISSIONS_KEY, Vec::new)
    }

    /// Newest first.
    pub async fn prepend(&self, submission: AssignmentSubmission) -> Result<Vec<AssignmentSubmission>, AppError> {
        let mut history = self.load().await?;
        history.insert(0, submission);
        self.save(&history).await?;
        Ok(history)
    }
}

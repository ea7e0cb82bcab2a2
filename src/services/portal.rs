use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calendar::{self, MonthView};
use crate::catalog::{Catalog, sample_student};
use crate::db::{EnrollmentRepository, ProfileRepository, RecordStore};
use crate::enrollment::{self, BlockStatus, EnrolledCourse, EnrollmentSummary};
use crate::error::AppError;
use crate::models::{
    Assignment, Course, CourseBlock, EnrollmentEntry, Instructor, Module, PaymentMethod,
    ProfileUpdate, SchoolEvent, Student,
};

/// Owns the student's profile and block selection. Each mutation is written
/// through to storage before the in-memory copy changes.
pub struct PortalService {
    catalog: Catalog,
    events: Vec<SchoolEvent>,
    profile_repo: ProfileRepository,
    enrollment_repo: EnrollmentRepository,
    profile: Mutex<Student>,
    selection: Mutex<Vec<EnrollmentEntry>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlockView {
    #[serde(flatten)]
    pub block: CourseBlock,
    pub seats_left: u32,
    pub status: BlockStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct CourseDetail {
    pub id: String,
    pub code: String,
    pub name: String,
    pub instructor: String,
    pub credits: u32,
    pub room: String,
    pub description: String,
    pub price_per_unit: u64,
    pub detailed_instructor: Option<Instructor>,
    pub modules: Vec<Module>,
    pub assignments: Vec<Assignment>,
    pub graded: Vec<Assignment>,
    pub tentative_grade: Option<f64>,
    pub meet_url: Option<String>,
    pub enrolled_block: Option<CourseBlock>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Receipt {
    pub reference: Uuid,
    pub method: PaymentMethod,
    pub courses: Vec<EnrolledCourse>,
    pub total_credits: u32,
    pub total_cost: u64,
    pub paid_at: String,
}

impl PortalService {
    /// Reads both persisted records once; bad or missing data falls back to
    /// the built-in defaults.
    pub async fn load(
        catalog: Catalog,
        events: Vec<SchoolEvent>,
        store: Arc<dyn RecordStore>,
    ) -> Result<Self, AppError> {
        let profile_repo = ProfileRepository::profile(store.clone());
        let enrollment_repo = EnrollmentRepository::enrollment(store);

        let profile = profile_repo.load().await?;
        let mut selection = enrollment_repo.load().await?;
        if enrollment::has_duplicate_courses(&selection) {
            warn!("stored selection lists a course twice, starting empty");
            selection = Vec::new();
        }
        info!("loaded profile {} with {} selected blocks", profile.id, selection.len());

        Ok(Self {
            catalog,
            events,
            profile_repo,
            enrollment_repo,
            profile: Mutex::new(profile),
            selection: Mutex::new(selection),
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn events(&self) -> &[SchoolEvent] {
        &self.events
    }

    pub async fn selection(&self) -> Vec<EnrollmentEntry> {
        self.selection.lock().await.clone()
    }

    pub async fn search_courses(&self, query: &str) -> Vec<Course> {
        let selection = self.selection.lock().await;
        self.catalog
            .search(query, &selection)
            .into_iter()
            .cloned()
            .collect()
    }

    pub async fn course_detail(&self, course_id: &str) -> Result<CourseDetail, AppError> {
        let course = self.catalog.course(course_id).ok_or(AppError::NotFound)?;
        let selection = self.selection.lock().await;
        let enrolled_block = selection
            .iter()
            .find(|e| e.course_id == course.id)
            .and_then(|e| course.block(&e.block_id))
            .cloned();

        Ok(CourseDetail {
            id: course.id.clone(),
            code: course.code.clone(),
            name: course.name.clone(),
            instructor: course.instructor.clone(),
            credits: course.credits,
            room: course.room.clone(),
            description: course.description.clone(),
            price_per_unit: course.price_per_unit,
            detailed_instructor: course.detailed_instructor.clone(),
            modules: course.modules.clone(),
            assignments: course.assignments.clone(),
            graded: course.graded_assignments().cloned().collect(),
            tentative_grade: course.tentative_grade(),
            meet_url: course.meet_url.clone(),
            enrolled_block,
        })
    }

    pub async fn block_views(&self, course_id: &str) -> Result<Vec<BlockView>, AppError> {
        let course = self.catalog.course(course_id).ok_or(AppError::NotFound)?;
        let selection = self.selection.lock().await;

        Ok(course
            .blocks
            .iter()
            .map(|block| BlockView {
                block: block.clone(),
                seats_left: block.seats_left(),
                status: enrollment::block_status(&selection, &self.catalog, &course.id, block),
            })
            .collect())
    }

    pub async fn summary(&self) -> EnrollmentSummary {
        let selection = self.selection.lock().await;
        enrollment::summarize(&selection, &self.catalog)
    }

    pub async fn select_block(&self, course_id: &str, block_id: &str) -> Result<EnrollmentSummary, AppError> {
        let block = self
            .catalog
            .block(course_id, block_id)
            .ok_or(AppError::NotFound)?;

        let mut selection = self.selection.lock().await;
        if let Err(rejection) = enrollment::check_selection(&selection, &self.catalog, course_id, block) {
            info!("rejected block {} for course {}: {}", block_id, course_id, rejection);
            return Err(rejection.into());
        }

        let next = enrollment::add_or_replace_entry(&selection, course_id, block_id);
        self.enrollment_repo.save(&next).await?;
        *selection = next;
        info!("selected block {} for course {}", block_id, course_id);

        Ok(enrollment::summarize(&selection, &self.catalog))
    }

    pub async fn drop_course(&self, course_id: &str) -> Result<EnrollmentSummary, AppError> {
        let mut selection = self.selection.lock().await;
        if !selection.iter().any(|e| e.course_id == course_id) {
            return Err(AppError::NotFound);
        }

        let next = enrollment::remove_entry(&selection, course_id);
        self.enrollment_repo.save(&next).await?;
        *selection = next;
        info!("dropped course {}", course_id);

        Ok(enrollment::summarize(&selection, &self.catalog))
    }

    pub async fn checkout(&self, method: PaymentMethod) -> Result<Receipt, AppError> {
        let selection = self.selection.lock().await;
        if selection.is_empty() {
            return Err(AppError::BadRequest("No subjects selected".to_string()));
        }

        let summary = enrollment::summarize(&selection, &self.catalog);
        let receipt = Receipt {
            reference: Uuid::new_v4(),
            method,
            courses: summary.courses,
            total_credits: summary.total_credits,
            total_cost: summary.total_cost,
            paid_at: Utc::now().to_rfc3339(),
        };
        info!("checkout {} via {:?}: {}", receipt.reference, method, receipt.total_cost);
        Ok(receipt)
    }

    pub async fn profile(&self) -> Student {
        self.profile.lock().await.clone()
    }

    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<Student, AppError> {
        let mut profile = self.profile.lock().await;
        let mut next = profile.clone();
        next.apply(update);

        self.profile_repo.save(&next).await?;
        *profile = next.clone();
        Ok(next)
    }

    pub async fn reset_profile(&self) -> Result<Student, AppError> {
        let mut profile = self.profile.lock().await;
        let sample = sample_student();

        self.profile_repo.save(&sample).await?;
        *profile = sample.clone();
        Ok(sample)
    }

    pub fn month_view(&self, year: i32, month: u32) -> Result<MonthView, AppError> {
        calendar::month_view(year, month, &self.catalog, &self.events)
    }
}

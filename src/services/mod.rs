pub mod assignment_helper;
pub mod portal;

pub use assignment_helper::{AnalysisOutcome, AssignmentHelper};
pub use portal::{BlockView, CourseDetail, PortalService, Receipt};

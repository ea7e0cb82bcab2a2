pub mod course;
pub mod enrollment;
pub mod event;
pub mod student;
pub mod submission;

pub use course::{Assignment, AssignmentKind, AssignmentStatus, Course, CourseBlock, Instructor, Module};
pub use enrollment::{CheckoutRequest, EnrollRequest, EnrollmentEntry, PaymentMethod};
pub use event::{EventCategory, SchoolEvent};
pub use student::{ProfileUpdate, Student};
pub use submission::{AnalysisTool, AnalyzeRequest, AssignmentSubmission, MediaUpload, SubmitRequest};

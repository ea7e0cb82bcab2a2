use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub code: String,
    pub name: String,
    pub instructor: String,
    pub credits: u32,
    pub room: String,
    pub description: String,
    pub price_per_unit: u64,
    pub blocks: Vec<CourseBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_instructor: Option<Instructor>,
    #[serde(default)]
    pub modules: Vec<Module>,
    #[serde(default)]
    pub assignments: Vec<Assignment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meet_url: Option<String>,
}

impl Course {
    pub fn block(&self, block_id: &str) -> Option<&CourseBlock> {
        self.blocks.iter().find(|b| b.id == block_id)
    }

    /// Tuition for one enrollment in this course.
    pub fn cost(&self) -> u64 {
        self.price_per_unit * u64::from(self.credits)
    }

    /// Submitted assignments that carry a score.
    pub fn graded_assignments(&self) -> impl Iterator<Item = &Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.status == AssignmentStatus::Submitted && a.score.is_some())
    }

    pub fn tentative_grade(&self) -> Option<f64> {
        let scores: Vec<u32> = self.graded_assignments().filter_map(|a| a.score).collect();
        if scores.is_empty() {
            return None;
        }
        Some(scores.iter().map(|&s| f64::from(s)).sum::<f64>() / scores.len() as f64)
    }
}

/// One scheduled section of a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseBlock {
    pub id: String,
    pub section: String,
    /// e.g. "Mon/Wed 08:00 AM - 09:30 AM"
    pub schedule: String,
    pub instructor: String,
    pub capacity: u32,
    pub enrolled: u32,
}

impl CourseBlock {
    pub fn is_full(&self) -> bool {
        self.enrolled >= self.capacity
    }

    pub fn seats_left(&self) -> u32 {
        self.capacity.saturating_sub(self.enrolled)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instructor {
    pub name: String,
    pub email: String,
    pub bio: String,
    pub photo: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub id: String,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssignmentStatus {
    Missed,
    NearDue,
    Submitted,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentKind {
    Text,
    File,
    Quiz,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: String,
    pub title: String,
    pub status: AssignmentStatus,
    /// Percentage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
    /// `YYYY-MM-DD`, or free text such as "Daily" for recurring work.
    pub due_date: String,
    pub kind: AssignmentKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission_date: Option<String>,
}

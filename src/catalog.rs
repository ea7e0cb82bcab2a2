use crate::models::{
    Assignment, AssignmentKind, AssignmentStatus, Course, CourseBlock, EnrollmentEntry,
    EventCategory, Instructor, Module, SchoolEvent, Student,
};

/// Read-only course catalog shared by enrollment and calendar.
#[derive(Debug, Clone)]
pub struct Catalog {
    courses: Vec<Course>,
}

impl Catalog {
    pub fn new(courses: Vec<Course>) -> Self {
        Self { courses }
    }

    pub fn sample() -> Self {
        Self::new(sample_courses())
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn course(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    pub fn course_by_code(&self, code: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.code.eq_ignore_ascii_case(code))
    }

    pub fn block(&self, course_id: &str, block_id: &str) -> Option<&CourseBlock> {
        self.course(course_id)?.block(block_id)
    }

    /// Case-insensitive match on name or code. Courses already in the
    /// selection come first; catalog order is kept otherwise.
    pub fn search(&self, query: &str, selection: &[EnrollmentEntry]) -> Vec<&Course> {
        let needle = query.trim().to_lowercase();
        let mut hits: Vec<&Course> = self
            .courses
            .iter()
            .filter(|c| {
                needle.is_empty()
                    || c.name.to_lowercase().contains(&needle)
                    || c.code.to_lowercase().contains(&needle)
            })
            .collect();

        hits.sort_by_key(|c| !selection.iter().any(|e| e.course_id == c.id));
        hits
    }
}

pub fn sample_student() -> Student {
    Student {
        id: "2023-10492".to_string(),
        name: "Alex Sterling".to_string(),
        email: "alex.sterling@university.edu".to_string(),
        major: "Computer Science & Artificial Intelligence".to_string(),
        year: 3,
        gpa: 3.85,
        avatar: "https://picsum.photos/seed/alex/200/200".to_string(),
        bio: Some(
            "Passionate about machine learning and building accessible AI tools for students."
                .to_string(),
        ),
        birthdate: Some("2002-05-14".to_string()),
        is_online: Some(true),
    }
}

fn standard_blocks(course_id: &str, year: u32) -> Vec<CourseBlock> {
    let block = |n: u32, letter: char, schedule: &str, instructor: &str, enrolled: u32| CourseBlock {
        id: format!("{}-b{}", course_id, n),
        section: format!("{}{}", year, letter),
        schedule: schedule.to_string(),
        instructor: instructor.to_string(),
        capacity: 40,
        enrolled,
    };

    vec![
        block(1, 'A', "Mon/Wed 08:00 AM - 09:30 AM", "Dr. Elena Vance", 38),
        block(2, 'B', "Tue/Thu 10:00 AM - 11:30 AM", "TBA", 12),
        block(3, 'F', "Mon/Wed 01:00 PM - 02:30 PM", "Prof. Silas Thorne", 40),
    ]
}

fn assignment(
    id: &str,
    title: &str,
    status: AssignmentStatus,
    due_date: &str,
    kind: AssignmentKind,
) -> Assignment {
    Assignment {
        id: id.to_string(),
        title: title.to_string(),
        status,
        score: None,
        due_date: due_date.to_string(),
        kind,
        submission_date: None,
    }
}

fn plain_course(
    id: &str,
    code: &str,
    name: &str,
    instructor: &str,
    credits: u32,
    room: &str,
    price_per_unit: u64,
    description: &str,
    year: u32,
) -> Course {
    Course {
        id: id.to_string(),
        code: code.to_string(),
        name: name.to_string(),
        instructor: instructor.to_string(),
        credits,
        room: room.to_string(),
        description: description.to_string(),
        price_per_unit,
        blocks: standard_blocks(id, year),
        detailed_instructor: None,
        modules: Vec::new(),
        assignments: Vec::new(),
        meet_url: None,
    }
}

pub fn sample_courses() -> Vec<Course> {
    let mut cs301 = plain_course(
        "1",
        "CS301",
        "Data Structures & Algorithms",
        "Dr. Elena Vance",
        4,
        "U302",
        1550,
        "Advanced concepts in algorithms and complex data structures.",
        3,
    );
    cs301.detailed_instructor = Some(Instructor {
        name: "Dr. Elena Vance".to_string(),
        email: "elena.vance@uc.edu.ph".to_string(),
        bio: "Ph.D. in Theoretical Computer Science.".to_string(),
        photo: "https://i.pravatar.cc/150?u=elena".to_string(),
    });
    cs301.modules = vec![
        Module {
            id: "m1".to_string(),
            title: "Introduction to Big O".to_string(),
            content: "Big O notation is used to describe the complexity of an algorithm.".to_string(),
        },
        Module {
            id: "m2".to_string(),
            title: "Linked Lists & Stacks".to_string(),
            content: "A linked list is a linear collection of data elements.".to_string(),
        },
    ];
    let mut lab = assignment(
        "a1",
        "Complexity Lab",
        AssignmentStatus::Submitted,
        "2024-03-20",
        AssignmentKind::File,
    );
    lab.score = Some(95);
    lab.submission_date = Some("2024-03-18".to_string());
    cs301.assignments = vec![
        lab,
        assignment("a2", "Recursive Sorts", AssignmentStatus::NearDue, "2024-05-30", AssignmentKind::Text),
        assignment("att", "Daily Attendance", AssignmentStatus::None, "Daily", AssignmentKind::Text),
    ];
    cs301.meet_url = Some("https://meet.google.com/abc-defg-hij".to_string());

    let mut ai202 = plain_course(
        "2",
        "AI202",
        "Introduction to Machine Learning",
        "Prof. Silas Thorne",
        3,
        "U601",
        1800,
        "Fundamentals of predictive modeling and neural networks.",
        2,
    );
    ai202.detailed_instructor = Some(Instructor {
        name: "Prof. Silas Thorne".to_string(),
        email: "silas.thorne@uc.edu.ph".to_string(),
        bio: "Senior AI Researcher specializing in Neural Networks and Deep Learning.".to_string(),
        photo: "https://i.pravatar.cc/150?u=silas".to_string(),
    });
    ai202.modules = vec![Module {
        id: "m1".to_string(),
        title: "Linear Regression".to_string(),
        content: "Linear regression is a linear approach to modeling the relationship.".to_string(),
    }];
    ai202.assignments = vec![assignment(
        "a1",
        "Dataset Cleaning",
        AssignmentStatus::Missed,
        "2024-04-01",
        AssignmentKind::File,
    )];
    ai202.meet_url = Some("https://zoom.us/j/123456789".to_string());

    vec![
        cs301,
        ai202,
        plain_course(
            "3",
            "MATH210",
            "Linear Algebra",
            "Dr. Sarah Chen",
            3,
            "M101",
            1400,
            "Matrix theory and vector spaces for scientific computing.",
            2,
        ),
        plain_course(
            "4",
            "HUM101",
            "Philosophy of Mind",
            "Prof. Julian Grey",
            3,
            "F201",
            1200,
            "Exploring the nature of consciousness and cognitive theories.",
            1,
        ),
        plain_course(
            "5",
            "PHYS201",
            "Quantum Mechanics I",
            "Dr. Robert Oppen",
            4,
            "S405",
            1650,
            "Introduction to wave functions and quantum states.",
            2,
        ),
    ]
}

pub fn sample_events() -> Vec<SchoolEvent> {
    let event = |id: &str, title: &str, date: &str, category: EventCategory, description: &str| SchoolEvent {
        id: id.to_string(),
        title: title.to_string(),
        date: date.to_string(),
        category,
        description: description.to_string(),
    };

    vec![
        event("e1", "Fall Career Fair", "2024-10-15", EventCategory::Social, "Meet with top industry recruiters at the Main Gym."),
        event("e2", "Midterm Examinations", "2024-10-21", EventCategory::Academic, "First batch of mid-semester evaluations."),
        event("e3", "Homecoming Weekend", "2024-11-02", EventCategory::Social, "Alumni meetups and the annual varsity game."),
        event("e4", "Thanksgiving Break", "2024-11-25", EventCategory::Holiday, "University closed for one week."),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_ids_are_unique_across_catalog() {
        let catalog = Catalog::sample();
        let mut ids: Vec<&str> = catalog
            .courses()
            .iter()
            .flat_map(|c| c.blocks.iter().map(|b| b.id.as_str()))
            .collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn test_search_matches_name_or_code() {
        let catalog = Catalog::sample();

        let by_code: Vec<_> = catalog.search("cs3", &[]).iter().map(|c| c.code.clone()).collect();
        assert_eq!(by_code, vec!["CS301"]);

        let by_name: Vec<_> = catalog.search("LINEAR", &[]).iter().map(|c| c.code.clone()).collect();
        assert_eq!(by_name, vec!["MATH210"]);

        assert_eq!(catalog.search("", &[]).len(), 5);
    }

    #[test]
    fn test_search_puts_selected_courses_first() {
        let catalog = Catalog::sample();
        let selection = vec![EnrollmentEntry::new("4", "4-b2")];

        let codes: Vec<_> = catalog.search("", &selection).iter().map(|c| c.code.clone()).collect();
        assert_eq!(codes, vec!["HUM101", "CS301", "AI202", "MATH210", "PHYS201"]);
    }

    #[test]
    fn test_block_lookup() {
        let catalog = Catalog::sample();
        assert_eq!(
            catalog.block("1", "1-b1").map(|b| b.schedule.as_str()),
            Some("Mon/Wed 08:00 AM - 09:30 AM")
        );
        assert!(catalog.block("1", "2-b1").is_none());
        assert!(catalog.block("99", "1-b1").is_none());
        assert_eq!(catalog.course_by_code("ai202").map(|c| c.id.as_str()), Some("2"));
    }
}

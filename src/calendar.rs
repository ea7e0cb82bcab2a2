//! Month view: school events, assignment due dates and recurring lecture days
//! bucketed per day of month.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

use crate::catalog::Catalog;
use crate::error::AppError;
use crate::models::SchoolEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarItemKind {
    Assignment,
    Event,
    Lecture,
    Meeting,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarItem {
    pub id: String,
    pub kind: CalendarItemKind,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

/// Day of month -> items, one key per day even when empty.
pub type MonthItems = BTreeMap<u32, Vec<CalendarItem>>;

/// A schedule string split into its weekday set and display-only time text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub days: Vec<Weekday>,
    pub time: String,
}

impl Schedule {
    /// First token is `/`-separated weekday abbreviations, the rest is kept
    /// verbatim. Unknown abbreviations are dropped.
    pub fn parse(raw: &str) -> Self {
        let (days_part, time) = match raw.split_once(' ') {
            Some((days, rest)) => (days, rest.to_string()),
            None => (raw, String::new()),
        };

        let days = days_part.split('/').filter_map(weekday_from_abbrev).collect();
        Self { days, time }
    }

    pub fn meets_on(&self, weekday: Weekday) -> bool {
        self.days.contains(&weekday)
    }
}

fn weekday_from_abbrev(abbrev: &str) -> Option<Weekday> {
    match abbrev {
        "Sun" => Some(Weekday::Sun),
        "Mon" => Some(Weekday::Mon),
        "Tue" => Some(Weekday::Tue),
        "Wed" => Some(Weekday::Wed),
        "Thu" => Some(Weekday::Thu),
        "Fri" => Some(Weekday::Fri),
        "Sat" => Some(Weekday::Sat),
        _ => None,
    }
}

fn first_of_month(year: i32, month: u32) -> Result<NaiveDate, AppError> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid month: {}-{}", year, month)))
}

/// Number of days in `month` (1-based).
pub fn days_in_month(year: i32, month: u32) -> Result<u32, AppError> {
    let first = first_of_month(year, month)?;
    let (next_year, next_month) = shift_month(year, month, 1)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid month: {}-{}", year, month)))?;
    let next = first_of_month(next_year, next_month)?;
    Ok(next.signed_duration_since(first).num_days() as u32)
}

/// Moves `delta` months forward (or back), rolling the year. `None` when
/// `month` is outside 1..=12 or the result does not fit in an `i32` year.
pub fn shift_month(year: i32, month: u32, delta: i32) -> Option<(i32, u32)> {
    if !(1..=12).contains(&month) {
        return None;
    }
    let index = i64::from(year) * 12 + i64::from(month - 1) + i64::from(delta);
    let next_year = i32::try_from(index.div_euclid(12)).ok()?;
    Some((next_year, index.rem_euclid(12) as u32 + 1))
}

/// Items for every day of the month. Within a day: events, then assignments,
/// then lecture/meeting pairs per course per block in catalog order.
pub fn build_month(
    year: i32,
    month: u32,
    catalog: &Catalog,
    events: &[SchoolEvent],
) -> Result<MonthItems, AppError> {
    let total_days = days_in_month(year, month)?;
    let mut days = MonthItems::new();

    for d in 1..=total_days {
        let date = NaiveDate::from_ymd_opt(year, month, d).ok_or(AppError::InternalServerError)?;
        let date_str = date.format("%Y-%m-%d").to_string();
        let weekday = date.weekday();
        let mut items = Vec::new();

        for event in events.iter().filter(|e| e.date == date_str) {
            items.push(CalendarItem {
                id: event.id.clone(),
                kind: CalendarItemKind::Event,
                title: event.title.clone(),
                course_code: None,
                time: None,
            });
        }

        for course in catalog.courses() {
            for assignment in course.assignments.iter().filter(|a| a.due_date == date_str) {
                items.push(CalendarItem {
                    id: format!("{}-{}", course.id, assignment.id),
                    kind: CalendarItemKind::Assignment,
                    title: format!("{}: {}", course.code, assignment.title),
                    course_code: Some(course.code.clone()),
                    time: None,
                });
            }
        }

        for course in catalog.courses() {
            for block in &course.blocks {
                let schedule = Schedule::parse(&block.schedule);
                if !schedule.meets_on(weekday) {
                    continue;
                }

                items.push(CalendarItem {
                    id: format!("{}-lec-{}", block.id, d),
                    kind: CalendarItemKind::Lecture,
                    title: format!("{} Lecture", course.code),
                    course_code: Some(course.code.clone()),
                    time: Some(schedule.time.clone()),
                });

                // Every lecture day doubles as an online session when a link exists.
                if course.meet_url.is_some() {
                    items.push(CalendarItem {
                        id: format!("{}-meet-{}", block.id, d),
                        kind: CalendarItemKind::Meeting,
                        title: format!("{} Online", course.code),
                        course_code: Some(course.code.clone()),
                        time: Some(schedule.time),
                    });
                }
            }
        }

        days.insert(d, items);
    }

    Ok(days)
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    /// 0 = Sunday .. 6 = Saturday, for laying out the grid.
    pub first_weekday: u32,
    pub days_in_month: u32,
    pub days: MonthItems,
}

pub fn month_view(
    year: i32,
    month: u32,
    catalog: &Catalog,
    events: &[SchoolEvent],
) -> Result<MonthView, AppError> {
    let first = first_of_month(year, month)?;
    let days = build_month(year, month, catalog, events)?;

    Ok(MonthView {
        year,
        month,
        first_weekday: first.weekday().num_days_from_sunday(),
        days_in_month: days.len() as u32,
        days,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{sample_courses, sample_events};
    use crate::models::{Course, CourseBlock};

    fn bare_course(id: &str, code: &str, schedule: &str, meet_url: Option<&str>) -> Course {
        Course {
            id: id.to_string(),
            code: code.to_string(),
            name: code.to_string(),
            instructor: "TBA".to_string(),
            credits: 3,
            room: "R1".to_string(),
            description: String::new(),
            price_per_unit: 1000,
            blocks: vec![CourseBlock {
                id: format!("{}-b1", id),
                section: "1A".to_string(),
                schedule: schedule.to_string(),
                instructor: "TBA".to_string(),
                capacity: 10,
                enrolled: 0,
            }],
            detailed_instructor: None,
            modules: Vec::new(),
            assignments: Vec::new(),
            meet_url: meet_url.map(str::to_string),
        }
    }

    #[test]
    fn test_assignment_lands_on_due_day_only() {
        let catalog = Catalog::new(sample_courses());
        let month = build_month(2024, 3, &catalog, &[]).expect("march");

        let hits: Vec<(u32, &CalendarItem)> = month
            .iter()
            .flat_map(|(d, items)| items.iter().map(move |i| (*d, i)))
            .filter(|(_, i)| i.kind == CalendarItemKind::Assignment)
            .collect();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0, 20);
        assert_eq!(hits[0].1.title, "CS301: Complexity Lab");
        assert_eq!(hits[0].1.course_code.as_deref(), Some("CS301"));
    }

    #[test]
    fn test_every_day_has_a_bucket() {
        let catalog = Catalog::new(Vec::new());

        let feb_leap = build_month(2024, 2, &catalog, &[]).expect("feb");
        assert_eq!(feb_leap.len(), 29);
        assert!(feb_leap.values().all(Vec::is_empty));

        assert_eq!(build_month(2023, 2, &catalog, &[]).expect("feb").len(), 28);
        assert_eq!(build_month(2024, 12, &catalog, &[]).expect("dec").len(), 31);
        assert_eq!(build_month(2024, 4, &catalog, &[]).expect("apr").len(), 30);
    }

    #[test]
    fn test_rebuilding_gives_equal_output() {
        let catalog = Catalog::new(sample_courses());
        let events = sample_events();
        let first = build_month(2024, 10, &catalog, &events).expect("oct");
        let second = build_month(2024, 10, &catalog, &events).expect("oct");
        assert_eq!(first, second);
    }

    #[test]
    fn test_lectures_follow_weekdays() {
        let catalog = Catalog::new(vec![bare_course("x", "X100", "Mon/Wed 08:00 AM - 09:30 AM", None)]);
        // 2024-07-01 is a Monday.
        let month = build_month(2024, 7, &catalog, &[]).expect("july");

        let lecture_days: Vec<u32> = month
            .iter()
            .filter(|(_, items)| !items.is_empty())
            .map(|(d, _)| *d)
            .collect();
        assert_eq!(lecture_days, vec![1, 3, 8, 10, 15, 17, 22, 24, 29, 31]);

        let item = &month[&1][0];
        assert_eq!(item.kind, CalendarItemKind::Lecture);
        assert_eq!(item.title, "X100 Lecture");
        assert_eq!(item.time.as_deref(), Some("08:00 AM - 09:30 AM"));
    }

    #[test]
    fn test_meeting_follows_lecture_when_link_exists() {
        let catalog = Catalog::new(vec![bare_course(
            "x",
            "X100",
            "Fri 10:00 AM - 11:00 AM",
            Some("https://meet.example/x"),
        )]);
        // 2024-07-05 is a Friday.
        let month = build_month(2024, 7, &catalog, &[]).expect("july");
        let kinds: Vec<_> = month[&5].iter().map(|i| i.kind).collect();
        assert_eq!(kinds, vec![CalendarItemKind::Lecture, CalendarItemKind::Meeting]);
        assert_eq!(month[&5][1].title, "X100 Online");
    }

    #[test]
    fn test_unknown_weekdays_are_ignored() {
        let catalog = Catalog::new(vec![
            bare_course("x", "X100", "Lun/Mar 08:00 AM", None),
            bare_course("y", "Y100", "", None),
        ]);
        let month = build_month(2024, 7, &catalog, &[]).expect("july");
        assert!(month.values().all(Vec::is_empty));
    }

    #[test]
    fn test_items_ordered_events_then_assignments_then_lectures() {
        let mut course = bare_course("x", "X100", "Tue 09:00 AM - 10:00 AM", None);
        course.assignments = sample_courses()[0].assignments.clone();
        course.assignments[0].due_date = "2024-10-15".to_string();
        let catalog = Catalog::new(vec![course]);
        let events = sample_events();

        // 2024-10-15 is a Tuesday and hosts the career fair.
        let month = build_month(2024, 10, &catalog, &events).expect("oct");
        let kinds: Vec<_> = month[&15].iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![
                CalendarItemKind::Event,
                CalendarItemKind::Assignment,
                CalendarItemKind::Lecture
            ]
        );
    }

    #[test]
    fn test_invalid_month_is_rejected() {
        let catalog = Catalog::new(Vec::new());
        assert!(matches!(
            build_month(2024, 13, &catalog, &[]),
            Err(AppError::BadRequest(_))
        ));
        assert!(build_month(2024, 0, &catalog, &[]).is_err());
    }

    #[test]
    fn test_shift_month_rolls_year() {
        assert_eq!(shift_month(2024, 12, 1), Some((2025, 1)));
        assert_eq!(shift_month(2024, 1, -1), Some((2023, 12)));
        assert_eq!(shift_month(2024, 5, 0), Some((2024, 5)));
        assert_eq!(shift_month(2024, 5, -29), Some((2021, 12)));
    }

    #[test]
    fn test_shift_month_at_year_limits() {
        assert_eq!(shift_month(i32::MAX, 12, 1), None);
        assert_eq!(shift_month(i32::MIN, 1, -1), None);
        assert_eq!(shift_month(i32::MAX, 11, 1), Some((i32::MAX, 12)));
        assert_eq!(shift_month(2024, 0, 1), None);
        assert_eq!(shift_month(2024, 13, -1), None);
    }

    #[test]
    fn test_out_of_range_year_is_rejected() {
        let catalog = Catalog::new(Vec::new());
        assert!(matches!(
            build_month(i32::MAX, 12, &catalog, &[]),
            Err(AppError::BadRequest(_))
        ));
        assert!(days_in_month(i32::MIN, 1).is_err());
    }

    #[test]
    fn test_month_view_first_weekday() {
        let view = month_view(2024, 9, &Catalog::new(Vec::new()), &[]).expect("sept");
        // 2024-09-01 is a Sunday.
        assert_eq!(view.first_weekday, 0);
        assert_eq!(view.days_in_month, 30);
    }

    #[test]
    fn test_schedule_parse() {
        let schedule = Schedule::parse("Tue/Thu 10:00 AM - 11:30 AM");
        assert_eq!(schedule.days, vec![Weekday::Tue, Weekday::Thu]);
        assert_eq!(schedule.time, "10:00 AM - 11:30 AM");
        assert!(Schedule::parse("Sat").meets_on(Weekday::Sat));
    }
}

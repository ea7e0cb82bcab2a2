//! Block selection rules: conflicts, capacity, one entry per course, totals.
//!
//! Every function here is pure. Selections are never mutated in place; the
//! caller gets a fresh `Vec` back and decides when to persist it.

use serde::Serialize;
use thiserror::Error;

use crate::catalog::Catalog;
use crate::models::{Course, CourseBlock, EnrollmentEntry};

/// Why a block cannot be selected. The display strings are user-facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectionRejection {
    #[error("Block Selected")]
    AlreadySelected,
    #[error("Section Full")]
    SectionFull,
    #[error("Time Conflict")]
    TimeConflict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockStatus {
    Available,
    AlreadySelected,
    Full,
    Conflict,
}

/// Resolves each entry to its block, skipping entries whose course or block
/// no longer exists.
fn selected_blocks<'a>(
    selection: &'a [EnrollmentEntry],
    catalog: &'a Catalog,
) -> impl Iterator<Item = &'a CourseBlock> + 'a {
    selection
        .iter()
        .filter_map(|e| catalog.block(&e.course_id, &e.block_id))
}

/// Schedules are compared as raw strings; no interval arithmetic.
pub fn has_conflict(selection: &[EnrollmentEntry], catalog: &Catalog, candidate: &CourseBlock) -> bool {
    selected_blocks(selection, catalog).any(|b| b.schedule == candidate.schedule)
}

pub fn is_full(block: &CourseBlock) -> bool {
    block.is_full()
}

pub fn is_selected(selection: &[EnrollmentEntry], course_id: &str, block_id: &str) -> bool {
    selection
        .iter()
        .any(|e| e.course_id == course_id && e.block_id == block_id)
}

/// Replaces the block of an existing entry for `course_id`, or appends a new
/// entry. Other courses are left untouched.
pub fn add_or_replace_entry(
    selection: &[EnrollmentEntry],
    course_id: &str,
    block_id: &str,
) -> Vec<EnrollmentEntry> {
    let mut next = selection.to_vec();
    match next.iter_mut().find(|e| e.course_id == course_id) {
        Some(existing) => existing.block_id = block_id.to_string(),
        None => next.push(EnrollmentEntry::new(course_id, block_id)),
    }
    next
}

/// A selection holding two entries for one course is not a valid selection.
pub fn has_duplicate_courses(selection: &[EnrollmentEntry]) -> bool {
    selection
        .iter()
        .enumerate()
        .any(|(i, e)| selection[..i].iter().any(|prev| prev.course_id == e.course_id))
}

pub fn remove_entry(selection: &[EnrollmentEntry], course_id: &str) -> Vec<EnrollmentEntry> {
    selection
        .iter()
        .filter(|e| e.course_id != course_id)
        .cloned()
        .collect()
}

/// Unresolvable entries contribute nothing.
pub fn total_cost(selection: &[EnrollmentEntry], catalog: &Catalog) -> u64 {
    selection
        .iter()
        .filter_map(|e| catalog.course(&e.course_id))
        .map(Course::cost)
        .sum()
}

pub fn total_credits(selection: &[EnrollmentEntry], catalog: &Catalog) -> u32 {
    selection
        .iter()
        .filter_map(|e| catalog.course(&e.course_id))
        .map(|c| c.credits)
        .sum()
}

/// Status shown next to a block. When several apply, an active selection
/// wins over fullness, and fullness wins over a conflict.
pub fn block_status(
    selection: &[EnrollmentEntry],
    catalog: &Catalog,
    course_id: &str,
    block: &CourseBlock,
) -> BlockStatus {
    if is_selected(selection, course_id, &block.id) {
        BlockStatus::AlreadySelected
    } else if is_full(block) {
        BlockStatus::Full
    } else if has_conflict(selection, catalog, block) {
        BlockStatus::Conflict
    } else {
        BlockStatus::Available
    }
}

pub fn check_selection(
    selection: &[EnrollmentEntry],
    catalog: &Catalog,
    course_id: &str,
    block: &CourseBlock,
) -> Result<(), SelectionRejection> {
    match block_status(selection, catalog, course_id, block) {
        BlockStatus::Available => Ok(()),
        BlockStatus::AlreadySelected => Err(SelectionRejection::AlreadySelected),
        BlockStatus::Full => Err(SelectionRejection::SectionFull),
        BlockStatus::Conflict => Err(SelectionRejection::TimeConflict),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EnrolledCourse {
    pub course_id: String,
    pub code: String,
    pub name: String,
    pub credits: u32,
    pub block: CourseBlock,
    pub cost: u64,
}

/// Resolved selection in catalog order.
pub fn enrolled_courses(selection: &[EnrollmentEntry], catalog: &Catalog) -> Vec<EnrolledCourse> {
    catalog
        .courses()
        .iter()
        .filter_map(|course| {
            let entry = selection.iter().find(|e| e.course_id == course.id)?;
            let block = course.block(&entry.block_id)?;
            Some(EnrolledCourse {
                course_id: course.id.clone(),
                code: course.code.clone(),
                name: course.name.clone(),
                credits: course.credits,
                block: block.clone(),
                cost: course.cost(),
            })
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct EnrollmentSummary {
    pub entries: Vec<EnrollmentEntry>,
    pub courses: Vec<EnrolledCourse>,
    pub total_credits: u32,
    pub total_cost: u64,
}

pub fn summarize(selection: &[EnrollmentEntry], catalog: &Catalog) -> EnrollmentSummary {
    EnrollmentSummary {
        entries: selection.to_vec(),
        courses: enrolled_courses(selection, catalog),
        total_credits: total_credits(selection, catalog),
        total_cost: total_cost(selection, catalog),
    }
}

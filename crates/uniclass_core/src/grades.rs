//! crates/uniclass_core/src/grades.rs
//!
//! Weighted grade aggregation. Everything here is pure and usable without a store.

use crate::domain::{Grade, NewGrade};

impl Grade {
    /// `score / total_points * 100`, or `None` when `total_points` cannot be divided by.
    pub fn percentage(&self) -> Option<f64> {
        percentage_of(self.score, self.total_points)
    }
}

fn percentage_of(score: f64, total_points: f64) -> Option<f64> {
    if total_points.is_finite() && total_points > 0.0 && score.is_finite() {
        Some(score / total_points * 100.0)
    } else {
        None
    }
}

/// The weighted mean of the grades' percentages.
///
/// Returns 0 for an empty list or when the weights sum to zero. Grades whose
/// `total_points` is not strictly positive are left out of both sums.
pub fn aggregate(grades: &[Grade]) -> f64 {
    let mut weighted_sum = 0.0;
    let mut weight_sum = 0.0;

    for grade in grades {
        let Some(pct) = grade.percentage() else {
            continue;
        };
        weighted_sum += pct * grade.weight;
        weight_sum += grade.weight;
    }

    if weight_sum > 0.0 {
        weighted_sum / weight_sum
    } else {
        0.0
    }
}

/// The average shown as a subject's current grade; `None` means "no grades yet".
pub fn current_grade(grades: &[Grade]) -> Option<f64> {
    if grades.is_empty() {
        None
    } else {
        Some(aggregate(grades))
    }
}

/// Display text for the current grade: one decimal and a percent sign, or "No grades".
pub fn format_current_grade(grades: &[Grade]) -> String {
    match current_grade(grades) {
        Some(avg) => format!("{:.1}%", avg),
        None => "No grades".to_string(),
    }
}

pub fn highest_percentage(grades: &[Grade]) -> Option<f64> {
    grades
        .iter()
        .filter_map(Grade::percentage)
        .fold(None, |best, pct| match best {
            Some(b) if b >= pct => Some(b),
            _ => Some(pct),
        })
}

pub fn total_weight(grades: &[Grade]) -> f64 {
    grades.iter().map(|g| g.weight).sum()
}

/// How many percentage points this grade contributes: `percentage * weight / 100`.
pub fn weighted_contribution(grade: &Grade) -> f64 {
    grade
        .percentage()
        .map(|pct| pct * grade.weight / 100.0)
        .unwrap_or(0.0)
}

//=========================================================================================
// Validation
//=========================================================================================

/// Checks the fields every stored grade must satisfy.
pub(crate) fn check_grade_fields(
    name: &str,
    score: f64,
    total_points: f64,
    weight: f64,
) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("grade name must not be empty".to_string());
    }
    if !score.is_finite() || score < 0.0 {
        return Err(format!("score must be a non-negative number, got {}", score));
    }
    if !total_points.is_finite() || total_points <= 0.0 {
        return Err(format!(
            "total points must be greater than zero, got {}",
            total_points
        ));
    }
    if !weight.is_finite() || weight < 0.0 {
        return Err(format!("weight must be a non-negative number, got {}", weight));
    }
    Ok(())
}

impl NewGrade {
    pub fn validate(&self) -> Result<(), String> {
        check_grade_fields(&self.name, self.score, self.total_points, self.weight)
    }
}

impl Grade {
    pub fn validate(&self) -> Result<(), String> {
        check_grade_fields(&self.name, self.score, self.total_points, self.weight)
    }
}

//! crates/uniclass_core/src/seed.rs
//!
//! The sample subjects a fresh install starts with.

use crate::domain::{File, FileKind, Grade, Subject};
use chrono::{Duration, Utc};

fn grade(id: &str, name: &str, score: f64, weight: f64) -> Grade {
    Grade {
        id: id.to_string(),
        name: name.to_string(),
        score,
        total_points: 100.0,
        weight,
    }
}

pub fn seed_subjects() -> Vec<Subject> {
    let now = Utc::now();
    vec![
        Subject {
            id: "1".to_string(),
            name: "Introduction to Computer Science".to_string(),
            description: "Fundamentals of computing, algorithms, and programming concepts"
                .to_string(),
            color: "#4A90E2".to_string(),
            professor: Some("Dr. Smith".to_string()),
            notes: "Remember to review the binary tree traversal methods for the midterm!"
                .to_string(),
            grades: vec![
                grade("101", "Midterm", 85.0, 30.0),
                grade("102", "Assignment 1", 92.0, 15.0),
            ],
            files: vec![File {
                id: "201".to_string(),
                name: "Lecture 1 - Intro to Algorithms.pdf".to_string(),
                url: "#".to_string(),
                kind: FileKind::Lecture,
                uploaded_at: now,
            }],
            created_at: now,
        },
        Subject {
            id: "2".to_string(),
            name: "Calculus II".to_string(),
            description: "Advanced integration techniques and infinite series".to_string(),
            color: "#27AE60".to_string(),
            professor: Some("Dr. Johnson".to_string()),
            notes: "Focus on convergence tests for the next quiz!".to_string(),
            grades: vec![
                grade("103", "Quiz 1", 78.0, 20.0),
                grade("104", "Homework 1-3", 90.0, 10.0),
            ],
            files: vec![File {
                id: "202".to_string(),
                name: "Integration by Parts Summary.pdf".to_string(),
                url: "#".to_string(),
                kind: FileKind::Notes,
                uploaded_at: now,
            }],
            created_at: now - Duration::days(1),
        },
    ]
}

//! Route handlers organized by resource

pub mod courses;
pub mod debug;
pub mod enrollments;
pub mod health;
pub mod students;

use serde::Serialize;

/// Plain acknowledgement body for mutations without a payload
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

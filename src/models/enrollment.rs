use serde::{Deserialize, Serialize};

/// A student's chosen block for one course.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnrollmentEntry {
    pub course_id: String,
    pub block_id: String,
}

impl EnrollmentEntry {
    pub fn new(course_id: impl Into<String>, block_id: impl Into<String>) -> Self {
        Self {
            course_id: course_id.into(),
            block_id: block_id.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollRequest {
    pub course_id: String,
    pub block_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    GCash,
    #[serde(rename = "BDO")]
    Bdo,
    #[serde(rename = "BPI")]
    Bpi,
    Card,
    Cashier,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub method: PaymentMethod,
}

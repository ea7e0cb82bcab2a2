use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisTool {
    Image,
    Video,
    Audio,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentSubmission {
    pub id: String,
    pub timestamp: String,
    pub tool: AnalysisTool,
    pub analysis: String,
    pub student_notes: String,
}

/// Media as it arrives from the client: base64 payload plus optional MIME type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaUpload {
    pub data: String,
    #[serde(default)]
    pub mime_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub tool: AnalysisTool,
    #[serde(flatten)]
    pub media: MediaUpload,
    #[serde(default)]
    pub prompt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitRequest {
    pub tool: AnalysisTool,
    pub analysis: String,
    #[serde(default)]
    pub student_notes: String,
}

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{error, info};
use uuid::Uuid;

use crate::db::SubmissionRepository;
use crate::error::AppError;
use crate::gemini::AnalysisClient;
use crate::models::{AnalysisTool, AssignmentSubmission, MediaUpload};

pub const MISSING_INPUT: &str = "Please provide both a file and a prompt.";
pub const MISSING_AUDIO: &str = "No audio was recorded.";
pub const NOTHING_TO_SUBMIT: &str = "Run an analysis before submitting.";
pub const ANALYSIS_FAILED: &str = "Error processing file. Please ensure your API key is valid.";
pub const TRANSCRIPTION_FAILED: &str = "Failed to transcribe audio.";

const DEFAULT_VIDEO_MIME: &str = "video/mp4";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisOutcome {
    pub tool: AnalysisTool,
    pub text: String,
    pub succeeded: bool,
}

/// AI-assisted analysis plus the local submission history.
pub struct AssignmentHelper {
    ai: Arc<dyn AnalysisClient>,
    submissions: SubmissionRepository,
    /// Held across the load-modify-save of the history.
    history_lock: Mutex<()>,
}

/// Accepts either a bare base64 payload or a `data:<mime>;base64,<payload>` URL.
fn payload(data: &str) -> &str {
    match data.split_once(',') {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => data,
    }
}

impl AssignmentHelper {
    pub fn new(ai: Arc<dyn AnalysisClient>, submissions: SubmissionRepository) -> Self {
        Self {
            ai,
            submissions,
            history_lock: Mutex::new(()),
        }
    }

    /// Upstream failures become a fixed message; only missing input is an error.
    pub async fn analyze(
        &self,
        tool: AnalysisTool,
        media: &MediaUpload,
        prompt: &str,
    ) -> Result<AnalysisOutcome, AppError> {
        if tool == AnalysisTool::Audio {
            return self.transcribe(media).await;
        }

        let data = payload(media.data.trim());
        if data.is_empty() || prompt.trim().is_empty() {
            return Err(AppError::BadRequest(MISSING_INPUT.to_string()));
        }

        let result = match tool {
            AnalysisTool::Image => self.ai.analyze_image(data, prompt).await,
            _ => {
                let mime_type = media.mime_type.as_deref().unwrap_or(DEFAULT_VIDEO_MIME);
                self.ai.analyze_video(data, prompt, mime_type).await
            }
        };

        Ok(match result {
            Ok(text) => AnalysisOutcome { tool, text, succeeded: true },
            Err(e) => {
                error!("{:?} analysis failed: {}", tool, e);
                AnalysisOutcome {
                    tool,
                    text: ANALYSIS_FAILED.to_string(),
                    succeeded: false,
                }
            }
        })
    }

    pub async fn transcribe(&self, media: &MediaUpload) -> Result<AnalysisOutcome, AppError> {
        let data = payload(media.data.trim());
        if data.is_empty() {
            return Err(AppError::BadRequest(MISSING_AUDIO.to_string()));
        }

        Ok(match self.ai.transcribe_audio(data).await {
            Ok(text) => AnalysisOutcome {
                tool: AnalysisTool::Audio,
                text,
                succeeded: true,
            },
            Err(e) => {
                error!("transcription failed: {}", e);
                AnalysisOutcome {
                    tool: AnalysisTool::Audio,
                    text: TRANSCRIPTION_FAILED.to_string(),
                    succeeded: false,
                }
            }
        })
    }

    pub async fn submit(
        &self,
        tool: AnalysisTool,
        analysis: &str,
        student_notes: &str,
    ) -> Result<AssignmentSubmission, AppError> {
        if analysis.trim().is_empty() {
            return Err(AppError::BadRequest(NOTHING_TO_SUBMIT.to_string()));
        }

        let submission = AssignmentSubmission {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now().to_rfc3339(),
            tool,
            analysis: analysis.to_string(),
            student_notes: student_notes.to_string(),
        };
        {
            let _guard = self.history_lock.lock().await;
            self.submissions.prepend(submission.clone()).await?;
        }
        info!("stored {:?} submission {}", tool, submission.id);

        Ok(submission)
    }

    pub async fn history(&self) -> Result<Vec<AssignmentSubmission>, AppError> {
        self.submissions.load().await
    }
}

//! Interview entity and its JSON shape.
//!
//! The backend speaks camelCase JSON with most fields nullable. Parsing goes
//! through [`InterviewRecord`], a permissive wire struct, and is validated into
//! an [`Interview`] with [`Interview::from_json`], which returns a tagged
//! result instead of panicking. Unknown fields are ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::InterviewStatus;
use crate::domain::foundation::{InterviewId, Timestamp, UserId};

/// Reasons an interview payload could not be turned into an [`Interview`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterviewParseError {
    #[error("interview payload is malformed: {0}")]
    Malformed(String),

    #[error("interview payload is missing required field '{0}'")]
    MissingField(&'static str),

    #[error("interview field '{field}' is not a valid timestamp: {reason}")]
    InvalidTimestamp { field: &'static str, reason: String },
}

/// Wire representation of an interview, exactly as the backend sends it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub interview_date: Option<String>,
    #[serde(default)]
    pub status: InterviewStatus,
    #[serde(default)]
    pub overall_score: Option<i64>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default, rename = "type")]
    pub interview_type: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub questions: Option<Vec<Value>>,
    #[serde(default)]
    pub ai_session_id: Option<String>,
    #[serde(default)]
    pub audio_recording_url: Option<String>,
    #[serde(default)]
    pub transcript_url: Option<String>,
    #[serde(default)]
    pub ai_insights: Option<Vec<String>>,
    #[serde(default)]
    pub vapi_call_id: Option<String>,
    #[serde(default)]
    pub interview_duration: Option<i64>,
}

/// A persisted interview instance with its AI-session metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "InterviewRecord", into = "InterviewRecord")]
pub struct Interview {
    pub id: InterviewId,
    pub job_title: String,
    pub company_name: Option<String>,
    pub interview_date: Timestamp,
    pub status: InterviewStatus,
    pub overall_score: Option<i64>,
    pub user_id: Option<UserId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub role: Option<String>,
    pub interview_type: Option<String>,
    pub level: Option<String>,
    /// Question records, opaque to this crate.
    pub questions: Option<Vec<Value>>,
    pub ai_session_id: Option<String>,
    pub audio_recording_url: Option<String>,
    pub transcript_url: Option<String>,
    pub ai_insights: Option<Vec<String>>,
    pub vapi_call_id: Option<String>,
    /// Call length in seconds.
    pub interview_duration: Option<i64>,
}

impl Interview {
    /// Creates an interview with only the required fields set.
    ///
    /// `role` starts as the job title, as it does when parsed without one.
    pub fn new(
        id: InterviewId,
        job_title: impl Into<String>,
        interview_date: Timestamp,
        status: InterviewStatus,
    ) -> Self {
        let job_title = job_title.into();
        let now = Timestamp::now();
        Self {
            id,
            role: Some(job_title.clone()),
            job_title,
            company_name: None,
            interview_date,
            status,
            overall_score: None,
            user_id: None,
            created_at: now,
            updated_at: now,
            interview_type: None,
            level: None,
            questions: None,
            ai_session_id: None,
            audio_recording_url: None,
            transcript_url: None,
            ai_insights: None,
            vapi_call_id: None,
            interview_duration: None,
        }
    }

    pub fn with_company(mut self, company_name: impl Into<String>) -> Self {
        self.company_name = Some(company_name.into());
        self
    }

    pub fn with_user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Parses a JSON value, tolerating unknown fields.
    pub fn from_json(value: Value) -> Result<Self, InterviewParseError> {
        let record: InterviewRecord = serde_json::from_value(value)
            .map_err(|e| InterviewParseError::Malformed(e.to_string()))?;
        Self::try_from(record)
    }

    /// Serializes into the backend's JSON shape.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(InterviewRecord::from(self.clone())).unwrap_or(Value::Null)
    }
}

/// Parses an interview from a borrowed JSON value.
pub fn parse_interview(value: &Value) -> Result<Interview, InterviewParseError> {
    Interview::from_json(value.clone())
}

fn parse_timestamp(
    field: &'static str,
    value: Option<String>,
) -> Result<Timestamp, InterviewParseError> {
    match value {
        None => Ok(Timestamp::now()),
        Some(raw) => Timestamp::parse_iso(&raw).map_err(|e| InterviewParseError::InvalidTimestamp {
            field,
            reason: e.to_string(),
        }),
    }
}

impl TryFrom<InterviewRecord> for Interview {
    type Error = InterviewParseError;

    fn try_from(record: InterviewRecord) -> Result<Self, Self::Error> {
        let id = record
            .id
            .and_then(|id| InterviewId::new(id).ok())
            .ok_or(InterviewParseError::MissingField("id"))?;
        let job_title = record
            .job_title
            .ok_or(InterviewParseError::MissingField("jobTitle"))?;
        let role = record.role.or_else(|| Some(job_title.clone()));

        Ok(Self {
            id,
            company_name: record.company_name,
            interview_date: parse_timestamp("interviewDate", record.interview_date)?,
            status: record.status,
            overall_score: record.overall_score,
            user_id: record.user_id.and_then(|uid| UserId::new(uid).ok()),
            created_at: parse_timestamp("createdAt", record.created_at)?,
            updated_at: parse_timestamp("updatedAt", record.updated_at)?,
            role,
            interview_type: record.interview_type,
            level: record.level,
            questions: record.questions,
            ai_session_id: record.ai_session_id,
            audio_recording_url: record.audio_recording_url,
            transcript_url: record.transcript_url,
            ai_insights: record.ai_insights,
            vapi_call_id: record.vapi_call_id,
            interview_duration: record.interview_duration,
            job_title,
        })
    }
}

impl From<Interview> for InterviewRecord {
    fn from(interview: Interview) -> Self {
        Self {
            id: Some(interview.id.as_str().to_string()),
            job_title: Some(interview.job_title),
            company_name: interview.company_name,
            interview_date: Some(interview.interview_date.to_iso()),
            status: interview.status,
            overall_score: interview.overall_score,
            user_id: interview.user_id.map(|uid| uid.as_str().to_string()),
            created_at: Some(interview.created_at.to_iso()),
            updated_at: Some(interview.updated_at.to_iso()),
            role: interview.role,
            interview_type: interview.interview_type,
            level: interview.level,
            questions: interview.questions,
            ai_session_id: interview.ai_session_id,
            audio_recording_url: interview.audio_recording_url,
            transcript_url: interview.transcript_url,
            ai_insights: interview.ai_insights,
            vapi_call_id: interview.vapi_call_id,
            interview_duration: interview.interview_duration,
        }
    }
}

//! Validated request to create a new interview.

use serde::Serialize;

use super::InterviewStatus;
use crate::domain::foundation::{Timestamp, ValidationError};

/// Longest job title or company name the backend accepts.
pub const MAX_NAME_LEN: usize = 200;

/// A new interview, validated before any network call is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInterview {
    job_title: String,
    company_name: Option<String>,
    interview_date: Timestamp,
    status: InterviewStatus,
}

impl NewInterview {
    /// Validates and builds a creation request.
    ///
    /// The job title is trimmed and must be non-empty; a blank company name
    /// is treated as absent.
    pub fn new(
        job_title: impl Into<String>,
        company_name: Option<String>,
        interview_date: Timestamp,
        status: InterviewStatus,
    ) -> Result<Self, ValidationError> {
        let job_title = job_title.into().trim().to_string();
        if job_title.is_empty() {
            return Err(ValidationError::empty_field("jobTitle"));
        }
        let title_len = job_title.chars().count();
        if title_len > MAX_NAME_LEN {
            return Err(ValidationError::too_long("jobTitle", MAX_NAME_LEN, title_len));
        }

        let company_name = company_name
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        if let Some(company) = &company_name {
            let len = company.chars().count();
            if len > MAX_NAME_LEN {
                return Err(ValidationError::too_long("companyName", MAX_NAME_LEN, len));
            }
        }

        if !status.is_creatable() {
            return Err(ValidationError::invalid_format(
                "status",
                format!("'{}' cannot be requested on create", status),
            ));
        }

        Ok(Self {
            job_title,
            company_name,
            interview_date,
            status,
        })
    }

    pub fn job_title(&self) -> &str {
        &self.job_title
    }

    pub fn company_name(&self) -> Option<&str> {
        self.company_name.as_deref()
    }

    pub fn interview_date(&self) -> Timestamp {
        self.interview_date
    }

    pub fn status(&self) -> InterviewStatus {
        self.status
    }

    /// Request body for the create endpoint.
    pub fn to_body(&self) -> NewInterviewBody<'_> {
        NewInterviewBody {
            job_title: &self.job_title,
            company_name: self.company_name.as_deref(),
            interview_date: self.interview_date.to_iso(),
            status: self.status,
        }
    }
}

/// JSON body posted to create an interview.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInterviewBody<'a> {
    pub job_title: &'a str,
    pub company_name: Option<&'a str>,
    pub interview_date: String,
    pub status: InterviewStatus,
}

//! Interview records and their status lifecycle.

mod draft;
mod interview;
mod status;

pub use draft::{NewInterview, NewInterviewBody, MAX_NAME_LEN};
pub use interview::{parse_interview, Interview, InterviewParseError, InterviewRecord};
pub use status::InterviewStatus;

//! Job target form: either a pasted description, or company + role from
//! which a one-line description is synthesised.

use serde::Deserialize;

use crate::analysis::engine::JobTarget;
use crate::errors::AppError;

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum JobTargetRequest {
    Description { description: String },
    Details { company: String, role: String },
}

impl JobTargetRequest {
    pub fn into_target(self) -> Result<JobTarget, AppError> {
        match self {
            JobTargetRequest::Description { description } => {
                if description.trim().is_empty() {
                    return Err(AppError::Validation(
                        "Job description cannot be empty".to_string(),
                    ));
                }
                Ok(JobTarget {
                    description,
                    company: String::new(),
                    role: String::new(),
                })
            }
            JobTargetRequest::Details { company, role } => {
                if company.trim().is_empty() || role.trim().is_empty() {
                    return Err(AppError::Validation(
                        "Company and role are both required".to_string(),
                    ));
                }
                Ok(JobTarget {
                    description: format!("{role} position at {company}"),
                    company,
                    role,
                })
            }
        }
    }
}

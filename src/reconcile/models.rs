use serde::{Deserialize, Serialize};

/// Result of processing one input name.
///
/// `Added` and `AlreadyExists` carry the catalog's canonical name, the other
/// variants carry the name as the user typed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ItemOutcome {
    Added { name: String },
    AlreadyExists { name: String },
    NotFound { name: String },
    Error { name: String, message: String },
}

impl ItemOutcome {
    pub fn name(&self) -> &str {
        match self {
            ItemOutcome::Added { name }
            | ItemOutcome::AlreadyExists { name }
            | ItemOutcome::NotFound { name }
            | ItemOutcome::Error { name, .. } => name,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            ItemOutcome::Added { name } => format!("Added: {}", name),
            ItemOutcome::AlreadyExists { name } => format!("Already exists in Lidarr: {}", name),
            ItemOutcome::NotFound { name } => format!("Artist not found: {}", name),
            ItemOutcome::Error { name, message } => format!("{}: {}", name, message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub name: String,
    pub message: String,
}

/// Aggregated result of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub added: usize,
    pub already_exists: usize,
    pub not_found: usize,
    pub error: usize,
    pub total: usize,
    pub outcomes: Vec<ItemOutcome>,
    pub messages: Vec<String>,
    pub errors: Vec<ErrorDetail>,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: Vec<ItemOutcome>) -> Self {
        let mut summary = BatchSummary {
            total: outcomes.len(),
            ..Default::default()
        };

        for outcome in &outcomes {
            match outcome {
                ItemOutcome::Added { .. } => summary.added += 1,
                ItemOutcome::AlreadyExists { .. } => summary.already_exists += 1,
                ItemOutcome::NotFound { .. } => summary.not_found += 1,
                ItemOutcome::Error { name, message } => {
                    summary.error += 1;
                    summary.errors.push(ErrorDetail {
                        name: name.clone(),
                        message: message.clone(),
                    });
                }
            }
            summary.messages.push(outcome.describe());
        }

        summary.outcomes = outcomes;
        summary
    }

    pub fn headline(&self) -> String {
        format!(
            "Processing complete: Added: {}, Already Existed: {}, Not Found: {}, Errors: {} (Total: {})",
            self.added, self.already_exists, self.not_found, self.error, self.total
        )
    }
}

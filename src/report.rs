use std::str::FromStr;

use serde::Serialize;

use crate::model::{Fee, LotId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

/// What happened to one instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Accepted { vehicle_id: String, lot: LotId },
    Rejected { vehicle_id: String },
    Exited { vehicle_id: String, lot: LotId, fee: Fee },
    Failed { line: usize, error: String },
}

impl Outcome {
    /// One output line, without the trailing newline.
    pub fn render(&self, format: OutputFormat) -> Result<String, serde_json::Error> {
        match format {
            OutputFormat::Json => serde_json::to_string(self),
            OutputFormat::Text => Ok(match self {
                Outcome::Accepted { lot, .. } => format!("Accept {lot}"),
                Outcome::Rejected { .. } => "Reject".to_string(),
                Outcome::Exited { lot, fee, .. } => format!("{lot} {fee}"),
                Outcome::Failed { line, error } => format!("Error: line {line}: {error}"),
            }),
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::database::StoreError;

/// The supervisor's decision, as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SupervisionAction {
    #[serde(rename = "aprobar")]
    Aprobar,
    #[serde(rename = "rechazar")]
    Rechazar,
}

impl SupervisionAction {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "aprobar" => Some(Self::Aprobar),
            "rechazar" => Some(Self::Rechazar),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aprobar => "aprobar",
            Self::Rechazar => "rechazar",
        }
    }
}

/// What actually happened across both stores, step by step.
///
/// Success derives from the counters, never from the absence of errors: a
/// decision that warned on one sub-step still succeeds as long as at least
/// one mutation took effect. The warnings list is the operator's handle on
/// partial reconciliation, so it is always present in the response.
#[derive(Debug, Clone, Serialize)]
pub struct ReconciliationOutcome {
    pub success: bool,
    pub action: SupervisionAction,
    pub id: String,
    pub updated_main: u64,
    /// Only reported for approvals; rejection never inserts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inserted_main: Option<u64>,
    pub updated_temp: u64,
    pub deleted_temp: u64,
    pub warnings: Vec<String>,
}

impl ReconciliationOutcome {
    pub fn new(action: SupervisionAction, id: &str) -> Self {
        Self {
            success: false,
            action,
            id: id.to_string(),
            updated_main: 0,
            inserted_main: match action {
                SupervisionAction::Aprobar => Some(0),
                SupervisionAction::Rechazar => None,
            },
            updated_temp: 0,
            deleted_temp: 0,
            warnings: Vec::new(),
        }
    }

    pub fn inserted_main(&self) -> u64 {
        self.inserted_main.unwrap_or(0)
    }

    /// Demote a store failure to a prefixed warning and keep going.
    pub fn warn(&mut self, step: &str, error: &StoreError) {
        self.warnings.push(format!("{step}: {error}"));
    }

    /// Derive `success` from the counters once every step has run.
    pub fn finalize(mut self) -> Self {
        let mutations = match self.action {
            SupervisionAction::Aprobar => {
                self.updated_main + self.inserted_main() + self.updated_temp + self.deleted_temp
            }
            SupervisionAction::Rechazar => self.updated_main + self.updated_temp,
        };
        self.success = mutations > 0;
        self
    }
}

//! The approve/reject reconciliation across the main and staging stores.
//!
//! The two databases cannot share a transaction, so a supervisor's decision
//! runs as a fixed step sequence where every sub-step is fault-isolated: a
//! failing step is recorded as a warning and the remaining steps still
//! execute. Nothing is retried. The outcome always reports per-step row
//! counts and the accumulated warnings, so an operator can detect and
//! manually resolve a partially-applied decision; under interleaved
//! concurrent decisions a record can legitimately end up inconsistent
//! between the stores, and the counters are the detection mechanism.

pub mod outcome;

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use crate::database::{SupervisionStatus, SupervisionStore};
use crate::registry::TableSpec;

pub use outcome::{ReconciliationOutcome, SupervisionAction};

/// Column the supervisory status lives in, on every supervised table.
const SUPERVISION_COLUMN: &str = "supervision";
/// Reporting flag set alongside the status; reserved word in SQL, always quoted.
const CHECK_COLUMN: &str = "check";

/// Drives a decision across the main (authoritative) and staging
/// (pending-entry) stores.
pub struct ReconciliationEngine {
    main: Arc<dyn SupervisionStore>,
    staging: Arc<dyn SupervisionStore>,
}

impl ReconciliationEngine {
    pub fn new(main: Arc<dyn SupervisionStore>, staging: Arc<dyn SupervisionStore>) -> Self {
        Self { main, staging }
    }

    /// Apply a supervisor's decision to the record with the given id.
    ///
    /// Input is assumed validated (non-empty id, known supervised module);
    /// from here on nothing fails the request, it only warns.
    pub async fn decide(
        &self,
        spec: &TableSpec,
        action: SupervisionAction,
        id: &str,
    ) -> ReconciliationOutcome {
        info!(
            module = spec.slug,
            table = spec.table,
            action = action.as_str(),
            id = id,
            "Applying supervision decision"
        );

        let outcome = match action {
            SupervisionAction::Aprobar => self.approve(spec, id).await,
            SupervisionAction::Rechazar => self.reject(spec, id).await,
        };

        if outcome.warnings.is_empty() {
            info!(
                module = spec.slug,
                id = id,
                success = outcome.success,
                updated_main = outcome.updated_main,
                inserted_main = outcome.inserted_main(),
                updated_temp = outcome.updated_temp,
                deleted_temp = outcome.deleted_temp,
                "Supervision decision applied"
            );
        } else {
            warn!(
                module = spec.slug,
                id = id,
                success = outcome.success,
                warnings = ?outcome.warnings,
                "Supervision decision applied with warnings"
            );
        }

        outcome
    }

    /// Approval: update main; if the record is not there yet, promote the
    /// staging row via a dynamic insert; keep staging's status consistent;
    /// clean the staging row up once main holds the record.
    async fn approve(&self, spec: &TableSpec, id: &str) -> ReconciliationOutcome {
        let mut outcome = ReconciliationOutcome::new(SupervisionAction::Aprobar, id);

        match self
            .main
            .update_supervision(spec, id, SupervisionStatus::Aprobado)
            .await
        {
            Ok(rows) => outcome.updated_main = rows,
            Err(e) => outcome.warn("main_update_error", &e),
        }

        if outcome.updated_main == 0 {
            match self.staging.fetch_record(spec, id).await {
                Ok(Some(mut record)) => {
                    record.insert(
                        SUPERVISION_COLUMN.to_string(),
                        Value::String(SupervisionStatus::Aprobado.as_str().to_string()),
                    );
                    record.insert(
                        CHECK_COLUMN.to_string(),
                        Value::Bool(SupervisionStatus::Aprobado.check_flag()),
                    );

                    match self.main.insert_record(spec, &record).await {
                        Ok(rows) => outcome.inserted_main = Some(rows),
                        Err(e) => outcome.warn("main_insert_error", &e),
                    }
                }
                Ok(None) => outcome.warnings.push("no_temp_row_to_insert".to_string()),
                Err(e) => outcome.warn("temp_fetch_error", &e),
            }
        }

        // Keeps staging consistent if the row still exists there, whichever
        // path was taken above.
        match self
            .staging
            .update_supervision(spec, id, SupervisionStatus::Aprobado)
            .await
        {
            Ok(rows) => outcome.updated_temp = rows,
            Err(e) => outcome.warn("temp_update_error", &e),
        }

        if outcome.updated_main + outcome.inserted_main() > 0 {
            match self.staging.delete_record(spec, id).await {
                Ok(rows) => outcome.deleted_temp = rows,
                Err(e) => outcome.warn("temp_delete_error", &e),
            }
        }

        outcome.finalize()
    }

    /// Rejection: mark the record `rechazado` wherever it exists, then
    /// remove the staging row once main carries the terminal status.
    async fn reject(&self, spec: &TableSpec, id: &str) -> ReconciliationOutcome {
        let mut outcome = ReconciliationOutcome::new(SupervisionAction::Rechazar, id);

        match self
            .main
            .update_supervision(spec, id, SupervisionStatus::Rechazado)
            .await
        {
            Ok(rows) => outcome.updated_main = rows,
            Err(e) => outcome.warn("main_update_error", &e),
        }

        // Independently attempted; a main failure must not stop this.
        match self
            .staging
            .update_supervision(spec, id, SupervisionStatus::Rechazado)
            .await
        {
            Ok(rows) => outcome.updated_temp = rows,
            Err(e) => outcome.warn("temp_update_error", &e),
        }

        if outcome.updated_main >= 1 {
            match self.staging.delete_record(spec, id).await {
                Ok(rows) => outcome.deleted_temp = rows,
                Err(e) => outcome.warn("temp_delete_error", &e),
            }
        }

        outcome.finalize()
    }
}

//! New bill form: receipt upload on file selection, record assembly and persistence on submit.

use std::{path::Path, sync::Arc};

use anyhow::{Context, Result};
use shared::{
    domain::{BillId, BillStatus, Session},
    error::{BillFieldError, ReceiptFileError},
    protocol::{BillRecord, CreatedBill, RawBill},
    validation::{
        parse_amount, parse_bill_date, parse_expense_type, parse_pct, parse_vat,
        receipt_file_name, validate_receipt_file_name,
    },
};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::{
    error::StoreError,
    routes::{Navigator, Route},
    store::{BillsStore, ReceiptUpload},
    Notifier,
};

/// The file picked in the form's file input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    /// `input_value` may carry a directory part (`C:\fakepath\photo.png`).
    pub fn new(input_value: &str, bytes: Vec<u8>) -> Self {
        Self {
            name: receipt_file_name(input_value).to_string(),
            bytes,
        }
    }

    pub async fn from_path(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read receipt file '{}'", path.display()))?;
        Ok(Self::new(&path.to_string_lossy(), bytes))
    }

    pub fn content_type(&self) -> String {
        mime_guess::from_path(&self.name)
            .first_or_octet_stream()
            .essence_str()
            .to_string()
    }
}

/// Raw form input values, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewBillForm {
    pub expense_type: String,
    pub name: String,
    pub date: String,
    pub amount: String,
    pub vat: String,
    pub pct: String,
    pub commentary: String,
}

/// File-related state of the bill being composed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BillDraft {
    pub bill_id: Option<BillId>,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
}

#[derive(Debug, Error)]
pub enum NewBillError {
    #[error(transparent)]
    ReceiptFile(#[from] ReceiptFileError),
    #[error(transparent)]
    Field(#[from] BillFieldError),
    #[error("the receipt has not finished uploading")]
    ReceiptNotUploaded,
}

#[derive(Debug)]
pub enum UploadOutcome {
    Uploaded(CreatedBill),
    Rejected(ReceiptFileError),
    Failed(StoreError),
}

/// Every variant except `Blocked` navigated back to the bills list.
#[derive(Debug)]
pub enum SubmitOutcome {
    Persisted(RawBill),
    PersistFailed(StoreError),
    /// A complete draft but no store to persist it. Drafts are only filled by
    /// an upload through a store, so through the public API a controller
    /// without a store stops at `Blocked` (no receipt in the draft); only
    /// code inside this crate that sets the draft directly reaches this arm.
    NoStore,
    Blocked(NewBillError),
}

pub struct NewBillController {
    session: Session,
    store: Option<Arc<dyn BillsStore>>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    draft: BillDraft,
}

impl NewBillController {
    pub fn new(
        session: Session,
        store: Option<Arc<dyn BillsStore>>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            session,
            store,
            navigator,
            notifier,
            draft: BillDraft::default(),
        }
    }

    pub fn draft(&self) -> &BillDraft {
        &self.draft
    }

    /// Validates and uploads the selected receipt. Returns `None` when no store
    /// is configured. The draft only changes on a successful upload.
    pub async fn handle_change_file(&mut self, file: SelectedFile) -> Option<UploadOutcome> {
        let file_name = receipt_file_name(&file.name).to_string();
        if let Err(err) = validate_receipt_file_name(&file_name) {
            warn!(file_name = %file_name, "new bill: receipt rejected: {err}");
            self.notifier.alert(&err.to_string());
            return Some(UploadOutcome::Rejected(err));
        }

        let Some(store) = self.store.clone() else {
            debug!(file_name = %file_name, "new bill: no store configured, skipping upload");
            return None;
        };

        let upload = ReceiptUpload {
            content_type: file.content_type(),
            file_name: file_name.clone(),
            bytes: file.bytes,
            email: self.session.email.clone(),
        };

        match store.create(upload).await {
            Ok(created) => {
                info!(bill_id = %created.key, file_name = %file_name, "new bill: receipt uploaded");
                self.draft = BillDraft {
                    bill_id: Some(created.key.clone()),
                    file_url: Some(created.file_url.clone()),
                    file_name: Some(created.file_name.clone().unwrap_or(file_name)),
                };
                Some(UploadOutcome::Uploaded(created))
            }
            Err(err) => {
                error!(file_name = %file_name, "new bill: receipt upload failed: {err}");
                Some(UploadOutcome::Failed(err))
            }
        }
    }

    pub async fn handle_submit(&mut self, form: &NewBillForm) -> SubmitOutcome {
        let (bill_id, record) = match self.build_record(form) {
            Ok(prepared) => prepared,
            Err(err) => {
                warn!("new bill: submit blocked: {err}");
                self.notifier.alert(&err.to_string());
                return SubmitOutcome::Blocked(err);
            }
        };

        let outcome = match self.store.clone() {
            None => {
                debug!("new bill: no store configured, nothing persisted");
                SubmitOutcome::NoStore
            }
            Some(store) => match store.update(&bill_id, &record).await {
                Ok(saved) => {
                    info!(bill_id = %bill_id, "new bill: bill persisted");
                    SubmitOutcome::Persisted(saved)
                }
                Err(err) => {
                    // The list is shown again even though the bill may not be saved.
                    error!(bill_id = %bill_id, "new bill: persisting bill failed: {err}");
                    SubmitOutcome::PersistFailed(err)
                }
            },
        };

        self.draft = BillDraft::default();
        self.navigator.navigate(Route::Bills);
        outcome
    }

    fn build_record(&self, form: &NewBillForm) -> Result<(BillId, BillRecord), NewBillError> {
        let file_name = self.draft.file_name.as_deref().unwrap_or_default();
        validate_receipt_file_name(file_name)?;

        let (Some(bill_id), Some(file_url)) = (&self.draft.bill_id, &self.draft.file_url) else {
            return Err(NewBillError::ReceiptNotUploaded);
        };

        let record = BillRecord {
            email: self.session.email.clone(),
            expense_type: parse_expense_type(&form.expense_type)?,
            name: form.name.trim().to_string(),
            amount: parse_amount(&form.amount)?,
            date: parse_bill_date(&form.date)?,
            vat: parse_vat(&form.vat)?,
            pct: parse_pct(&form.pct)?,
            commentary: form.commentary.clone(),
            file_url: file_url.clone(),
            file_name: file_name.to_string(),
            status: BillStatus::Pending,
        };
        Ok((bill_id.clone(), record))
    }
}

#[cfg(test)]
#[path = "tests/new_bill_tests.rs"]
mod tests;

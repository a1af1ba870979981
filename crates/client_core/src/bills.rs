//! Bills list: fetch, format and order the current user's bills, and wire row actions.

use std::sync::Arc;

use shared::{
    domain::{BillId, BillStatus, Session},
    protocol::RawBill,
};
use tracing::{debug, error, info, warn};

use crate::{
    error::StoreError,
    format::{format_date, format_status},
    render::{BillsViewState, ReceiptModal, Renderer},
    routes::{Navigator, Route},
    store::BillsStore,
};

/// A bill prepared for display. `raw_date` keeps the stored value for ordering;
/// `date` is the display string (equal to `raw_date` when formatting failed).
#[derive(Debug, Clone, PartialEq)]
pub struct BillRow {
    pub id: Option<BillId>,
    pub expense_type: String,
    pub name: String,
    pub amount: Option<f64>,
    pub raw_date: String,
    pub date: String,
    pub status: BillStatus,
    pub status_label: &'static str,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
}

impl BillRow {
    pub fn from_raw(raw: RawBill) -> Self {
        let date = match format_date(&raw.date) {
            Ok(formatted) => formatted,
            Err(err) => {
                warn!(
                    bill_id = raw.id.as_ref().map(BillId::as_str).unwrap_or("-"),
                    raw_date = %raw.date,
                    "keeping unformatted bill date: {err}"
                );
                raw.date.clone()
            }
        };

        Self {
            id: raw.id,
            expense_type: raw.expense_type.unwrap_or_default(),
            name: raw.name.unwrap_or_default(),
            amount: raw.amount,
            raw_date: raw.date,
            date,
            status: raw.status,
            status_label: format_status(raw.status),
            file_url: raw.file_url,
            file_name: raw.file_name,
        }
    }

    pub fn amount_label(&self) -> String {
        match self.amount {
            Some(amount) => format!("{amount} €"),
            None => "-".to_string(),
        }
    }
}

/// Most recent first. Canonical `YYYY-MM-DD` strings order chronologically.
pub fn sort_most_recent_first(rows: &mut [BillRow]) {
    rows.sort_by(|a, b| b.raw_date.cmp(&a.raw_date));
}

pub struct BillsController {
    session: Session,
    store: Option<Arc<dyn BillsStore>>,
    navigator: Arc<dyn Navigator>,
    renderer: Arc<dyn Renderer>,
}

impl BillsController {
    pub fn new(
        session: Session,
        store: Option<Arc<dyn BillsStore>>,
        navigator: Arc<dyn Navigator>,
        renderer: Arc<dyn Renderer>,
    ) -> Self {
        Self {
            session,
            store,
            navigator,
            renderer,
        }
    }

    /// `Ok(None)` means no store is configured.
    pub async fn get_bills(&self) -> Result<Option<Vec<BillRow>>, StoreError> {
        let Some(store) = &self.store else {
            debug!("bills: no store configured");
            return Ok(None);
        };

        let raw_bills = store.list().await?;
        let mut rows: Vec<BillRow> = raw_bills.into_iter().map(BillRow::from_raw).collect();
        sort_most_recent_first(&mut rows);
        info!(
            user = %self.session.email,
            count = rows.len(),
            "bills: loaded"
        );
        Ok(Some(rows))
    }

    /// Renders the loading state, then either the list or the fetch error.
    pub async fn load(&self) -> BillsViewState {
        self.renderer.render_bills(&BillsViewState::Loading);

        let state = match self.get_bills().await {
            Ok(Some(rows)) => BillsViewState::Loaded(rows),
            Ok(None) => BillsViewState::Loaded(Vec::new()),
            Err(err) => {
                error!("bills: list failed: {err}");
                BillsViewState::Error(err.to_string())
            }
        };
        self.renderer.render_bills(&state);
        state
    }

    pub fn handle_click_new_bill(&self) {
        debug!("bills: new bill requested");
        self.navigator.navigate(Route::NewBill);
    }

    pub fn handle_click_icon_eye(&self, file_url: Option<&str>) -> ReceiptModal {
        let modal = ReceiptModal::for_url(file_url);
        self.renderer.render_receipt(&modal);
        modal
    }
}

#[cfg(test)]
#[path = "tests/bills_tests.rs"]
mod tests;

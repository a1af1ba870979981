//! View states handed to the rendering collaborator, plus a plain-text renderer.

use std::{
    fmt::Write as _,
    io::Write,
    sync::Mutex,
};

use tracing::warn;

use crate::bills::BillRow;

pub const BILLS_TITLE: &str = "Mes notes de frais";
pub const NEW_BILL_BUTTON: &str = "[Nouvelle note de frais]";
pub const NEW_BILL_TITLE: &str = "Envoyer une note de frais";
pub const LOADING_LABEL: &str = "Loading...";
pub const ERROR_LABEL: &str = "Erreur";
pub const VIEW_RECEIPT_CONTROL: &str = "[voir]";
pub const RECEIPT_PLACEHOLDER: &str = "Aucun justificatif disponible";

#[derive(Debug, Clone, PartialEq)]
pub enum BillsViewState {
    Loading,
    Error(String),
    Loaded(Vec<BillRow>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReceiptModal {
    Image { url: String },
    Placeholder,
}

impl ReceiptModal {
    /// Absent or empty URLs fall back to the placeholder.
    pub fn for_url(file_url: Option<&str>) -> Self {
        match file_url.map(str::trim) {
            Some(url) if !url.is_empty() => ReceiptModal::Image {
                url: url.to_string(),
            },
            _ => ReceiptModal::Placeholder,
        }
    }
}

pub trait Renderer: Send + Sync {
    fn render_bills(&self, state: &BillsViewState);
    fn render_receipt(&self, modal: &ReceiptModal);
}

/// Renders views as text into any writer (stdout for the console front end).
pub struct TextRenderer<W> {
    out: Mutex<W>,
    with_new_bill_button: bool,
}

impl<W: Write + Send> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
            with_new_bill_button: true,
        }
    }

    /// Read-only listing (admin dashboard): no new bill control.
    pub fn read_only(out: W) -> Self {
        Self {
            out: Mutex::new(out),
            with_new_bill_button: false,
        }
    }

    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn emit(&self, text: &str) {
        let mut out = match self.out.lock() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(err) = out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
            warn!("failed to write rendered view: {err}");
        }
    }
}

impl<W: Write + Send> Renderer for TextRenderer<W> {
    fn render_bills(&self, state: &BillsViewState) {
        self.emit(&bills_page(state, self.with_new_bill_button));
    }

    fn render_receipt(&self, modal: &ReceiptModal) {
        self.emit(&receipt_modal(modal));
    }
}

pub fn bills_page(state: &BillsViewState, with_new_bill_button: bool) -> String {
    match state {
        BillsViewState::Loading => format!("{LOADING_LABEL}\n"),
        BillsViewState::Error(message) => format!("{ERROR_LABEL}\n{message}\n"),
        BillsViewState::Loaded(rows) => {
            let mut page = String::new();
            let _ = writeln!(page, "{BILLS_TITLE}");
            if with_new_bill_button {
                let _ = writeln!(page, "{NEW_BILL_BUTTON}");
            }
            let _ = writeln!(
                page,
                "{:<24} {:<20} {:<12} {:>10} {:<12} Actions",
                "Type", "Nom", "Date", "Montant", "Statut"
            );
            for row in rows {
                let _ = writeln!(
                    page,
                    "{:<24} {:<20} {:<12} {:>10} {:<12} {VIEW_RECEIPT_CONTROL}",
                    row.expense_type,
                    row.name,
                    row.date,
                    row.amount_label(),
                    row.status_label,
                );
            }
            page
        }
    }
}

pub fn receipt_modal(modal: &ReceiptModal) -> String {
    match modal {
        ReceiptModal::Image { url } => format!("Justificatif\n{url}\n"),
        ReceiptModal::Placeholder => format!("Justificatif\n{RECEIPT_PLACEHOLDER}\n"),
    }
}

#[cfg(test)]
mod tests {
    use shared::domain::BillStatus;

    use super::*;

    fn row(date: &str) -> BillRow {
        BillRow {
            id: None,
            expense_type: "Transports".into(),
            name: "test1".into(),
            amount: Some(100.0),
            raw_date: date.into(),
            date: date.into(),
            status: BillStatus::Pending,
            status_label: "En attente",
            file_url: None,
            file_name: None,
        }
    }

    #[test]
    fn empty_list_renders_no_rows_and_no_receipt_control() {
        let page = bills_page(&BillsViewState::Loaded(Vec::new()), true);
        assert!(page.contains(BILLS_TITLE));
        assert!(page.contains(NEW_BILL_BUTTON));
        assert!(!page.contains(VIEW_RECEIPT_CONTROL));
    }

    #[test]
    fn loading_state_renders_indicator_only() {
        let page = bills_page(&BillsViewState::Loading, true);
        assert!(page.contains(LOADING_LABEL));
        assert!(!page.contains(BILLS_TITLE));
    }

    #[test]
    fn error_state_renders_message() {
        let page = bills_page(&BillsViewState::Error("i am an arror".into()), true);
        assert!(page.contains(ERROR_LABEL));
        assert!(page.contains("i am an arror"));
    }

    #[test]
    fn each_bill_gets_a_receipt_control() {
        let page = bills_page(
            &BillsViewState::Loaded(vec![row("2004-04-04"), row("2003-03-03")]),
            false,
        );
        assert_eq!(page.matches(VIEW_RECEIPT_CONTROL).count(), 2);
        assert!(!page.contains(NEW_BILL_BUTTON));
    }

    #[test]
    fn receipt_modal_falls_back_to_placeholder() {
        assert_eq!(ReceiptModal::for_url(None), ReceiptModal::Placeholder);
        assert_eq!(ReceiptModal::for_url(Some("  ")), ReceiptModal::Placeholder);
        assert_eq!(
            ReceiptModal::for_url(Some("https://localhost:3456/images/test.jpg")),
            ReceiptModal::Image {
                url: "https://localhost:3456/images/test.jpg".into()
            }
        );
    }

    #[test]
    fn text_renderer_writes_to_its_sink() {
        let renderer = TextRenderer::new(Vec::new());
        renderer.render_receipt(&ReceiptModal::Placeholder);
        let written = String::from_utf8(renderer.into_inner()).expect("utf8");
        assert!(written.contains(RECEIPT_PLACEHOLDER));
    }
}

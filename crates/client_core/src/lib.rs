pub mod bills;
pub mod error;
pub mod format;
pub mod http_store;
pub mod new_bill;
pub mod render;
pub mod routes;
pub mod store;

pub use bills::{BillRow, BillsController};
pub use error::StoreError;
pub use http_store::HttpBillsStore;
pub use new_bill::{
    BillDraft, NewBillController, NewBillError, NewBillForm, SelectedFile, SubmitOutcome,
    UploadOutcome,
};
pub use render::{BillsViewState, ReceiptModal, Renderer, TextRenderer};
pub use routes::{Navigator, Route};
pub use store::{BillsStore, InMemoryStore, ReceiptUpload, StoreCalls};

/// User-visible notices (the browser `alert` of the web front end).
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;

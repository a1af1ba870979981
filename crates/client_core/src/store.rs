use async_trait::async_trait;
use shared::{
    domain::{BillId, BillStatus},
    protocol::{BillRecord, CreatedBill, RawBill},
};
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::error::StoreError;

const IN_MEMORY_FILE_BASE_URL: &str = "https://localhost:3456/images";

/// Receipt payload sent with the create operation (the multipart `file` and `email` parts).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    pub email: String,
}

/// Remote bills resource. Every operation may fail; callers decide how each
/// failure surfaces.
#[async_trait]
pub trait BillsStore: Send + Sync {
    async fn list(&self) -> Result<Vec<RawBill>, StoreError>;
    async fn create(&self, upload: ReceiptUpload) -> Result<CreatedBill, StoreError>;
    async fn update(&self, selector: &BillId, record: &BillRecord) -> Result<RawBill, StoreError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreCalls {
    pub list: usize,
    pub create: usize,
    pub update: usize,
}

#[derive(Default)]
struct InMemoryState {
    bills: Vec<RawBill>,
    uploads: Vec<ReceiptUpload>,
    calls: StoreCalls,
    fail_list: Option<StoreError>,
    fail_create: Option<StoreError>,
    fail_update: Option<StoreError>,
}

/// Process-local bills store used by the demo front end and by tests.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<InMemoryState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bills(bills: Vec<RawBill>) -> Self {
        Self {
            state: Mutex::new(InMemoryState {
                bills,
                ..InMemoryState::default()
            }),
        }
    }

    pub fn with_fixtures() -> Self {
        Self::with_bills(fixture_bills())
    }

    pub fn failing_list(mut self, err: StoreError) -> Self {
        self.state.get_mut().fail_list = Some(err);
        self
    }

    pub fn failing_create(mut self, err: StoreError) -> Self {
        self.state.get_mut().fail_create = Some(err);
        self
    }

    pub fn failing_update(mut self, err: StoreError) -> Self {
        self.state.get_mut().fail_update = Some(err);
        self
    }

    pub async fn calls(&self) -> StoreCalls {
        self.state.lock().await.calls
    }

    pub async fn bills(&self) -> Vec<RawBill> {
        self.state.lock().await.bills.clone()
    }

    pub async fn uploads(&self) -> Vec<ReceiptUpload> {
        self.state.lock().await.uploads.clone()
    }
}

#[async_trait]
impl BillsStore for InMemoryStore {
    async fn list(&self) -> Result<Vec<RawBill>, StoreError> {
        let mut state = self.state.lock().await;
        state.calls.list += 1;
        if let Some(err) = &state.fail_list {
            return Err(err.clone());
        }
        Ok(state.bills.clone())
    }

    async fn create(&self, upload: ReceiptUpload) -> Result<CreatedBill, StoreError> {
        let mut state = self.state.lock().await;
        state.calls.create += 1;
        if let Some(err) = &state.fail_create {
            return Err(err.clone());
        }

        let key = BillId::new(Uuid::new_v4().simple().to_string());
        let file_url = format!("{IN_MEMORY_FILE_BASE_URL}/{}", upload.file_name);
        state.bills.push(RawBill {
            id: Some(key.clone()),
            email: Some(upload.email.clone()),
            file_url: Some(file_url.clone()),
            file_name: Some(upload.file_name.clone()),
            status: BillStatus::Pending,
            ..RawBill::default()
        });
        debug!(bill_id = %key, file_name = %upload.file_name, "in-memory store: receipt stored");

        let created = CreatedBill {
            file_url,
            key,
            file_name: Some(upload.file_name.clone()),
        };
        state.uploads.push(upload);
        Ok(created)
    }

    async fn update(&self, selector: &BillId, record: &BillRecord) -> Result<RawBill, StoreError> {
        let mut state = self.state.lock().await;
        state.calls.update += 1;
        if let Some(err) = &state.fail_update {
            return Err(err.clone());
        }

        let Some(slot) = state
            .bills
            .iter_mut()
            .find(|bill| bill.id.as_ref() == Some(selector))
        else {
            return Err(StoreError::rejected(404, format!("no bill with key {selector}")));
        };
        *slot = record.clone().into_raw(Some(selector.clone()));
        Ok(slot.clone())
    }
}

#[allow(clippy::too_many_arguments)]
fn fixture_bill(
    id: &str,
    expense_type: &str,
    name: &str,
    date: &str,
    amount: f64,
    vat: Option<f64>,
    status: BillStatus,
    file_name: &str,
) -> RawBill {
    RawBill {
        id: Some(BillId::new(id)),
        email: Some("a@a".to_string()),
        expense_type: Some(expense_type.to_string()),
        name: Some(name.to_string()),
        amount: Some(amount),
        date: date.to_string(),
        vat,
        pct: Some(20.0),
        commentary: Some(String::new()),
        file_url: Some(format!("{IN_MEMORY_FILE_BASE_URL}/{file_name}")),
        file_name: Some(file_name.to_string()),
        status,
    }
}

/// Sample bills used to seed the demo store.
pub fn fixture_bills() -> Vec<RawBill> {
    vec![
        fixture_bill(
            "47qAXb6fIm2zOKkLzMro",
            "Hôtel et logement",
            "encore",
            "2004-04-04",
            400.0,
            Some(80.0),
            BillStatus::Pending,
            "preview-facture-free-201801-pdf-1.jpg",
        ),
        fixture_bill(
            "BeKy5Mo4jkmdfPGYpTxZ",
            "Transports",
            "test1",
            "2001-01-01",
            100.0,
            None,
            BillStatus::Refused,
            "1592770761.jpeg",
        ),
        fixture_bill(
            "UIUZtnPQvnbFnB0ozvJh",
            "Services en ligne",
            "test3",
            "2003-03-03",
            300.0,
            Some(60.0),
            BillStatus::Accepted,
            "facture-client-php-exportee-dans-document-pdf-enregistre-sur-disque-dur.png",
        ),
        fixture_bill(
            "qcCK3SzECmaZAGRrHjaC",
            "Restaurants et bars",
            "test2",
            "2002-02-02",
            200.0,
            Some(40.0),
            BillStatus::Refused,
            "preview-facture-free-201801-pdf-1.jpg",
        ),
    ]
}

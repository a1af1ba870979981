use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client, RequestBuilder, Response,
};
use shared::{
    domain::BillId,
    error::{ApiError, ErrorCode},
    protocol::{BillRecord, CreatedBill, RawBill},
};
use tracing::debug;
use url::Url;

use crate::{
    error::StoreError,
    store::{BillsStore, ReceiptUpload},
};

/// Bills resource served over HTTP.
///
/// `GET /bills` lists, `POST /bills` uploads a receipt as multipart form data
/// (`file`, `email`), `PATCH /bills/{key}` completes the record created by the
/// upload.
pub struct HttpBillsStore {
    http: Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpBillsStore {
    pub fn new(
        base_url: &str,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let mut base_url = Url::parse(base_url)
            .map_err(|err| StoreError::Transport(format!("invalid store url '{base_url}': {err}")))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, StoreError> {
        self.base_url
            .join(path)
            .map_err(|err| StoreError::Transport(format!("invalid store endpoint '{path}': {err}")))
    }

    /// `bills/{key}` with the key as a single escaped path segment.
    fn bill_url(&self, selector: &BillId) -> Result<Url, StoreError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| StoreError::Transport(format!("store url '{}' cannot be a base", self.base_url)))?
            .pop_if_empty()
            .push("bills")
            .push(selector.as_str());
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

/// Turns non-2xx responses into [`StoreError::Rejected`], using the service's
/// error body when it has one.
async fn ensure_success(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let (code, message) = match serde_json::from_str::<ApiError>(&body) {
        Ok(api_error) => (
            api_error
                .code
                .unwrap_or_else(|| ErrorCode::from_status(status.as_u16())),
            api_error.message,
        ),
        Err(_) => (ErrorCode::from_status(status.as_u16()), status.to_string()),
    };
    Err(StoreError::Rejected {
        status: status.as_u16(),
        code,
        message,
    })
}

#[async_trait]
impl BillsStore for HttpBillsStore {
    async fn list(&self) -> Result<Vec<RawBill>, StoreError> {
        let url = self.endpoint("bills")?;
        debug!(%url, "http store: listing bills");
        let response = self.authorize(self.http.get(url)).send().await?;
        Ok(ensure_success(response).await?.json().await?)
    }

    async fn create(&self, upload: ReceiptUpload) -> Result<CreatedBill, StoreError> {
        let url = self.endpoint("bills")?;
        debug!(%url, file_name = %upload.file_name, "http store: uploading receipt");
        let file = Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(&upload.content_type)?;
        let form = Form::new().part("file", file).text("email", upload.email);
        let response = self
            .authorize(self.http.post(url))
            .multipart(form)
            .send()
            .await?;
        Ok(ensure_success(response).await?.json().await?)
    }

    async fn update(&self, selector: &BillId, record: &BillRecord) -> Result<RawBill, StoreError> {
        let url = self.bill_url(selector)?;
        debug!(%url, "http store: updating bill");
        let response = self
            .authorize(self.http.patch(url))
            .json(record)
            .send()
            .await?;
        Ok(ensure_success(response).await?.json().await?)
    }
}

#[cfg(test)]
#[path = "tests/http_store_tests.rs"]
mod tests;

use std::sync::{Arc, Mutex};

use crate::{
    render::{BillsViewState, ReceiptModal, Renderer},
    routes::{Navigator, Route},
    Notifier,
};

#[derive(Default)]
pub(crate) struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub(crate) fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn routes(&self) -> Vec<Route> {
        self.routes.lock().expect("routes").clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().expect("routes").push(route);
    }
}

#[derive(Default)]
pub(crate) struct RecordingNotifier {
    alerts: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub(crate) fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn alerts(&self) -> Vec<String> {
        self.alerts.lock().expect("alerts").clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts.lock().expect("alerts").push(message.to_string());
    }
}

#[derive(Default)]
pub(crate) struct RecordingRenderer {
    bills: Mutex<Vec<BillsViewState>>,
    receipts: Mutex<Vec<ReceiptModal>>,
}

impl RecordingRenderer {
    pub(crate) fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn bills_states(&self) -> Vec<BillsViewState> {
        self.bills.lock().expect("bills states").clone()
    }

    pub(crate) fn receipts(&self) -> Vec<ReceiptModal> {
        self.receipts.lock().expect("receipts").clone()
    }
}

impl Renderer for RecordingRenderer {
    fn render_bills(&self, state: &BillsViewState) {
        self.bills.lock().expect("bills states").push(state.clone());
    }

    fn render_receipt(&self, modal: &ReceiptModal) {
        self.receipts.lock().expect("receipts").push(modal.clone());
    }
}

//! Fakes shared by the unit tests.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use techstore_core::{CartSnapshot, ProductId, Quantity};

use crate::actions::{Navigator, Notification, Notifier, Redirect};
use crate::control::Control;
use crate::error::ServiceError;
use crate::service::{AddedToCart, BuyNowAccepted, CartService};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    Sync(CartSnapshot),
    Add(ProductId, Quantity),
    BuyNow(ProductId, Quantity),
    Clear,
}

/// Scripted [`CartService`] that records every call.
pub struct FakeCartService {
    list: Result<CartSnapshot, ServiceError>,
    sync: Result<(), ServiceError>,
    add: Result<AddedToCart, ServiceError>,
    buy_now: Result<BuyNowAccepted, ServiceError>,
    clear: Result<(), ServiceError>,
    delay: Option<Duration>,
    calls: Mutex<Vec<Call>>,
}

impl FakeCartService {
    /// A logged-in user with an empty server cart; every call succeeds.
    pub fn new() -> Self {
        Self {
            list: Ok(CartSnapshot::new()),
            sync: Ok(()),
            add: Ok(AddedToCart::default()),
            buy_now: Ok(BuyNowAccepted::default()),
            clear: Ok(()),
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A guest: every call answers 401.
    pub fn guest() -> Self {
        Self::new()
            .with_list(Err(ServiceError::Unauthenticated))
            .with_sync(Err(ServiceError::Unauthenticated))
            .with_add(Err(ServiceError::Unauthenticated))
            .with_buy_now(Err(ServiceError::Unauthenticated))
            .with_clear(Err(ServiceError::Unauthenticated))
    }

    pub fn with_list(mut self, list: Result<CartSnapshot, ServiceError>) -> Self {
        self.list = list;
        self
    }

    pub fn with_sync(mut self, sync: Result<(), ServiceError>) -> Self {
        self.sync = sync;
        self
    }

    pub fn with_add(mut self, add: Result<AddedToCart, ServiceError>) -> Self {
        self.add = add;
        self
    }

    pub fn with_buy_now(mut self, buy_now: Result<BuyNowAccepted, ServiceError>) -> Self {
        self.buy_now = buy_now;
        self
    }

    pub fn with_clear(mut self, clear: Result<(), ServiceError>) -> Self {
        self.clear = clear;
        self
    }

    /// Make `add` and `buy_now` take this long to answer.
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap_or_else(std::sync::PoisonError::into_inner).clone()
    }

    pub fn sync_pushes(&self) -> Vec<CartSnapshot> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Sync(cart) => Some(cart),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(call);
    }

    async fn wait(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl CartService for FakeCartService {
    async fn list(&self) -> Result<CartSnapshot, ServiceError> {
        self.record(Call::List);
        self.list.clone()
    }

    async fn sync(&self, cart: &CartSnapshot) -> Result<(), ServiceError> {
        self.record(Call::Sync(cart.clone()));
        self.sync.clone()
    }

    async fn add(
        &self,
        product_id: ProductId,
        quantity: Quantity,
    ) -> Result<AddedToCart, ServiceError> {
        self.record(Call::Add(product_id, quantity));
        self.wait().await;
        self.add.clone()
    }

    async fn buy_now(
        &self,
        product_id: ProductId,
        quantity: Quantity,
    ) -> Result<BuyNowAccepted, ServiceError> {
        self.record(Call::BuyNow(product_id, quantity));
        self.wait().await;
        self.buy_now.clone()
    }

    async fn clear(&self) -> Result<(), ServiceError> {
        self.record(Call::Clear);
        self.clear.clone()
    }
}

/// Records notifications.
#[derive(Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: &Notification) {
        self.notifications
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(notification.clone());
    }
}

/// Records navigations.
#[derive(Default)]
pub struct RecordingNavigator {
    redirects: Mutex<Vec<Redirect>>,
}

impl RecordingNavigator {
    pub fn redirects(&self) -> Vec<Redirect> {
        self.redirects
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, redirect: &Redirect) {
        self.redirects
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(redirect.clone());
    }
}

/// Records every busy-state change of a control.
#[derive(Default)]
pub struct RecordingControl {
    states: Mutex<Vec<bool>>,
}

impl RecordingControl {
    pub fn states(&self) -> Vec<bool> {
        self.states
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl Control for RecordingControl {
    fn set_busy(&self, busy: bool) {
        self.states
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(busy);
    }
}

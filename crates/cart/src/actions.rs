//! "Add to cart" and "Buy now" actions.
//!
//! Both actions call the server first and turn every outcome into a
//! notification for the user. Nothing here returns an error: a rejected or
//! failed request ends with an error notification and `None`.
//!
//! | Outcome | Notification | Navigation |
//! |---------|--------------|------------|
//! | success | success message | checkout redirect (buy now only) |
//! | 401 | "please log in" | login page after 800 ms |
//! | rejected, `requires_login` | "please log in" | login page after 1500 ms |
//! | rejected | server message or generic failure | none |
//! | request failed | per-action fallback message | none |

use std::sync::Arc;
use std::time::Duration;

use techstore_core::{ProductId, Quantity};
use tracing::{error, info, instrument};

use crate::control::{Control, DEFAULT_FAILSAFE, run_with_failsafe};
use crate::error::ServiceError;
use crate::service::{AddedToCart, BuyNowAccepted, CartService};
use crate::sync::CartSynchronizer;

/// Delay before the login redirect after a 401.
pub const UNAUTHENTICATED_REDIRECT_DELAY: Duration = Duration::from_millis(800);

/// Delay before the login redirect when a rejection asks for a login.
pub const REQUIRES_LOGIN_REDIRECT_DELAY: Duration = Duration::from_millis(1500);

/// Delay before following the checkout redirect of a successful "buy now".
pub const CHECKOUT_REDIRECT_DELAY: Duration = Duration::from_millis(1000);

/// Default login page.
pub const DEFAULT_LOGIN_PATH: &str = "/login/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}

/// A navigation to perform once `delay` has passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub target: String,
    pub delay: Duration,
}

/// Shows notifications to the user.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification);
}

/// Moves the user to another page.
///
/// Implementations own the scheduling: `redirect.delay` is how long to wait
/// before navigating.
pub trait Navigator: Send + Sync {
    fn navigate(&self, redirect: &Redirect);
}

/// Notifier that writes through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: &Notification) {
        match notification.kind {
            NotificationKind::Success => info!(message = %notification.message, "Notification"),
            NotificationKind::Error => error!(message = %notification.message, "Notification"),
        }
    }
}

/// Navigator that writes through `tracing` instead of navigating.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, redirect: &Redirect) {
        info!(target_url = %redirect.target, delay = ?redirect.delay, "Navigation requested");
    }
}

/// Settings for [`CartActions`].
#[derive(Debug, Clone)]
pub struct ActionSettings {
    /// Where to send users who must log in.
    pub login_path: String,
    /// How long a control may stay busy before it is released anyway.
    pub control_failsafe: Duration,
}

impl Default for ActionSettings {
    fn default() -> Self {
        Self {
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            control_failsafe: DEFAULT_FAILSAFE,
        }
    }
}

/// User-facing messages for one action.
struct Messages {
    success: &'static str,
    login: &'static str,
    rejected: &'static str,
    network: &'static str,
}

const ADD_TO_CART: Messages = Messages {
    success: "Product added to cart successfully!",
    login: "Please log in to add items to cart",
    rejected: "Failed to add to cart",
    // A request that never completes is most often a guest session
    network: "Please log in to add items to cart",
};

const BUY_NOW: Messages = Messages {
    success: "Redirecting to checkout...",
    login: "Please log in to purchase products",
    rejected: "Failed to process order",
    network: "Please try again later",
};

/// Server-backed cart actions with user feedback.
pub struct CartActions {
    cart: Arc<CartSynchronizer>,
    service: Arc<dyn CartService>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    settings: ActionSettings,
}

impl CartActions {
    #[must_use]
    pub fn new(
        cart: Arc<CartSynchronizer>,
        service: Arc<dyn CartService>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            cart,
            service,
            notifier,
            navigator,
            settings: ActionSettings::default(),
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: ActionSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub const fn settings(&self) -> &ActionSettings {
        &self.settings
    }

    #[must_use]
    pub const fn cart(&self) -> &Arc<CartSynchronizer> {
        &self.cart
    }

    /// Add a product to the server cart, then to the local cart.
    ///
    /// Returns the server's response on success.
    #[instrument(skip(self), fields(product_id = %product_id, quantity = %quantity))]
    pub async fn add_to_cart(
        &self,
        product_id: ProductId,
        quantity: Quantity,
    ) -> Option<AddedToCart> {
        match self.service.add(product_id, quantity).await {
            Ok(added) => {
                if let Err(e) = self.cart.add(product_id, quantity).await {
                    error!(error = %e, "Server accepted item but local cart update failed");
                }
                self.notifier
                    .notify(&Notification::success(ADD_TO_CART.success));
                Some(added)
            }
            Err(e) => {
                self.handle_failure(&e, &ADD_TO_CART);
                None
            }
        }
    }

    /// Start checkout for a single product.
    ///
    /// On success the user is sent to the server-supplied redirect, if any.
    #[instrument(skip(self), fields(product_id = %product_id, quantity = %quantity))]
    pub async fn buy_now(
        &self,
        product_id: ProductId,
        quantity: Quantity,
    ) -> Option<BuyNowAccepted> {
        match self.service.buy_now(product_id, quantity).await {
            Ok(accepted) => {
                self.notifier.notify(&Notification::success(BUY_NOW.success));
                if let Some(target) = &accepted.redirect {
                    self.navigator.navigate(&Redirect {
                        target: target.clone(),
                        delay: CHECKOUT_REDIRECT_DELAY,
                    });
                }
                Some(accepted)
            }
            Err(e) => {
                self.handle_failure(&e, &BUY_NOW);
                None
            }
        }
    }

    /// [`add_to_cart`](Self::add_to_cart) triggered from a control.
    ///
    /// The control is busy for the duration (bounded by the failsafe), and
    /// the local cart is reconciled afterwards whatever the outcome.
    pub async fn add_to_cart_from_control(
        &self,
        control: &dyn Control,
        product_id: ProductId,
        quantity: Quantity,
    ) -> Option<AddedToCart> {
        run_with_failsafe(control, self.settings.control_failsafe, async {
            let added = self.add_to_cart(product_id, quantity).await;
            self.cart.update_count().await;
            added
        })
        .await
    }

    /// [`buy_now`](Self::buy_now) triggered from a control.
    pub async fn buy_now_from_control(
        &self,
        control: &dyn Control,
        product_id: ProductId,
        quantity: Quantity,
    ) -> Option<BuyNowAccepted> {
        run_with_failsafe(
            control,
            self.settings.control_failsafe,
            self.buy_now(product_id, quantity),
        )
        .await
    }

    fn handle_failure(&self, err: &ServiceError, messages: &Messages) {
        info!(error = %err, "Cart action failed");

        match err {
            ServiceError::Unauthenticated => {
                self.notifier.notify(&Notification::error(messages.login));
                self.redirect_to_login(UNAUTHENTICATED_REDIRECT_DELAY);
            }
            ServiceError::ServerRejected {
                requires_login: true,
                ..
            } => {
                self.notifier.notify(&Notification::error(messages.login));
                self.redirect_to_login(REQUIRES_LOGIN_REDIRECT_DELAY);
            }
            ServiceError::ServerRejected { message, .. } => {
                let message = message.as_deref().unwrap_or(messages.rejected);
                self.notifier.notify(&Notification::error(message));
            }
            ServiceError::NetworkUnavailable(_) => {
                self.notifier.notify(&Notification::error(messages.network));
            }
        }
    }

    fn redirect_to_login(&self, delay: Duration) {
        self.navigator.navigate(&Redirect {
            target: self.settings.login_path.clone(),
            delay,
        });
    }
}

impl std::fmt::Debug for CartActions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartActions")
            .field("cart", &self.cart)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

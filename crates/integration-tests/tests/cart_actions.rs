//! "Add to cart" and "buy now" against the storefront API.

use std::time::Duration;

use mockito::Matcher;
use serde_json::json;
use techstore_cart::{NotificationKind, Redirect};
use techstore_core::{ProductId, Quantity};
use techstore_integration_tests::TestContext;

const COOKIE: &str = "sessionid=s1; csrftoken=t1";

#[tokio::test]
async fn test_add_to_cart_success_updates_local_cart() {
    let mut server = mockito::Server::new_async().await;
    let add = server
        .mock("POST", "/api/cart/add/")
        .match_header("x-csrftoken", "t1")
        .match_body(Matcher::Json(json!({"product_id": 42, "quantity": 2})))
        .with_status(200)
        .with_body(
            json!({"message": "Added Laptop to cart", "quantity": 2, "total": 1998.0}).to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let ctx = TestContext::logged_in(&server.url(), COOKIE);

    let added = ctx
        .actions
        .add_to_cart(ProductId::new(42), Quantity::new(2).unwrap())
        .await
        .unwrap();

    add.assert_async().await;
    assert_eq!(added.quantity, Some(2));
    assert_eq!(ctx.cart.get_count(), 2);

    let notifications = ctx.notifier.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::Success);
    assert_eq!(notifications[0].message, "Product added to cart successfully!");
    assert!(ctx.navigator.redirects().is_empty());
}

#[tokio::test]
async fn test_add_to_cart_unauthenticated_redirects_to_login() {
    let mut server = mockito::Server::new_async().await;
    let _add = server
        .mock("POST", "/api/cart/add/")
        .with_status(401)
        .with_body(json!({"error": "Authentication required"}).to_string())
        .create_async()
        .await;

    let ctx = TestContext::guest(&server.url());

    let added = ctx
        .actions
        .add_to_cart(ProductId::new(42), Quantity::ONE)
        .await;

    assert!(added.is_none());
    assert!(ctx.cart.get().is_empty());
    assert_eq!(
        ctx.notifier.notifications()[0].message,
        "Please log in to add items to cart"
    );
    assert_eq!(
        ctx.navigator.redirects(),
        vec![Redirect {
            target: "/login/".to_string(),
            delay: Duration::from_millis(800),
        }]
    );
}

#[tokio::test]
async fn test_add_to_cart_rejection_shows_server_message() {
    let mut server = mockito::Server::new_async().await;
    let _add = server
        .mock("POST", "/api/cart/add/")
        .with_status(400)
        .with_body(json!({"error": "Not enough stock"}).to_string())
        .create_async()
        .await;

    let ctx = TestContext::logged_in(&server.url(), COOKIE);

    let added = ctx
        .actions
        .add_to_cart(ProductId::new(42), Quantity::new(5).unwrap())
        .await;

    assert!(added.is_none());
    assert_eq!(ctx.cart.get_count(), 0);
    let notifications = ctx.notifier.notifications();
    assert_eq!(notifications[0].kind, NotificationKind::Error);
    assert_eq!(notifications[0].message, "Not enough stock");
    assert!(ctx.navigator.redirects().is_empty());
}

#[tokio::test]
async fn test_add_to_cart_rejection_without_message() {
    let mut server = mockito::Server::new_async().await;
    let _add = server
        .mock("POST", "/api/cart/add/")
        .with_status(500)
        .with_body("Internal Server Error")
        .create_async()
        .await;

    let ctx = TestContext::logged_in(&server.url(), COOKIE);

    ctx.actions
        .add_to_cart(ProductId::new(42), Quantity::ONE)
        .await;

    assert_eq!(
        ctx.notifier.notifications()[0].message,
        "Failed to add to cart"
    );
}

#[tokio::test]
async fn test_buy_now_requires_login() {
    let mut server = mockito::Server::new_async().await;
    let _buy = server
        .mock("POST", "/api/buy-now/")
        .with_status(403)
        .with_body(json!({"error": "Login required", "requires_login": true}).to_string())
        .create_async()
        .await;

    let ctx = TestContext::guest(&server.url());

    assert!(
        ctx.actions
            .buy_now(ProductId::new(7), Quantity::ONE)
            .await
            .is_none()
    );
    assert_eq!(
        ctx.notifier.notifications()[0].message,
        "Please log in to purchase products"
    );
    assert_eq!(
        ctx.navigator.redirects(),
        vec![Redirect {
            target: "/login/".to_string(),
            delay: Duration::from_millis(1500),
        }]
    );
}

#[tokio::test]
async fn test_buy_now_follows_checkout_redirect() {
    let mut server = mockito::Server::new_async().await;
    let buy = server
        .mock("POST", "/api/buy-now/")
        .match_header("x-csrftoken", "t1")
        .match_body(Matcher::Json(json!({"product_id": 7, "quantity": 1})))
        .with_status(200)
        .with_body(
            json!({
                "message": "Proceeding to checkout",
                "quantity": 1,
                "total": 25.0,
                "redirect": "/checkout/"
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let ctx = TestContext::logged_in(&server.url(), COOKIE);

    let accepted = ctx
        .actions
        .buy_now(ProductId::new(7), Quantity::ONE)
        .await
        .unwrap();

    buy.assert_async().await;
    assert_eq!(accepted.redirect.as_deref(), Some("/checkout/"));
    assert_eq!(
        ctx.notifier.notifications()[0].message,
        "Redirecting to checkout..."
    );
    assert_eq!(
        ctx.navigator.redirects(),
        vec![Redirect {
            target: "/checkout/".to_string(),
            delay: Duration::from_millis(1000),
        }]
    );
    // Buying does not touch the local cart
    assert!(ctx.cart.get().is_empty());
}

#[tokio::test]
async fn test_buy_now_malformed_success_body() {
    let mut server = mockito::Server::new_async().await;
    let _buy = server
        .mock("POST", "/api/buy-now/")
        .with_status(200)
        .with_body("<html>Sign in</html>")
        .create_async()
        .await;

    let ctx = TestContext::logged_in(&server.url(), COOKIE);

    assert!(
        ctx.actions
            .buy_now(ProductId::new(7), Quantity::ONE)
            .await
            .is_none()
    );
    assert_eq!(
        ctx.notifier.notifications()[0].message,
        "Please try again later"
    );
    assert!(ctx.navigator.redirects().is_empty());
}

#[tokio::test]
async fn test_unreachable_server_notifies() {
    let ctx = TestContext::guest("http://127.0.0.1:9");

    assert!(
        ctx.actions
            .add_to_cart(ProductId::new(1), Quantity::ONE)
            .await
            .is_none()
    );
    assert!(
        ctx.actions
            .buy_now(ProductId::new(1), Quantity::ONE)
            .await
            .is_none()
    );

    let messages: Vec<_> = ctx
        .notifier
        .notifications()
        .into_iter()
        .map(|n| n.message)
        .collect();
    assert_eq!(
        messages,
        vec![
            "Please log in to add items to cart".to_string(),
            "Please try again later".to_string(),
        ]
    );
    assert!(ctx.navigator.redirects().is_empty());
}

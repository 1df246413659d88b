//! Shopping sessions against a live catalog service.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use bookverse_core::{BookFilter, BookId, CartError, CheckoutOutcome, Price};
use bookverse_integration_tests::{TestServer, closed_port_url};
use bookverse_shop::{
    CartController, CatalogSource, CatalogView, ClientError, ControllerError, DeploymentMonitor,
    HealthIndicator, HttpCatalogClient, ShopConfig,
};

fn client_for(url: &str) -> HttpCatalogClient {
    HttpCatalogClient::new(&ShopConfig::new(url).unwrap()).unwrap()
}

#[tokio::test]
async fn test_add_remove_checkout() {
    let server = TestServer::start().await.unwrap();
    let mut session = CartController::new(client_for(&server.url()));

    // Pragmatic Programmer, Designing Data-Intensive Applications, Pragmatic Programmer
    for id in [1, 2, 1] {
        session.add_to_cart(BookId::new(id)).await.unwrap();
    }
    assert_eq!(session.cart_count(), 3);
    assert_eq!(session.cart_total(), Price::from_cents(11497));

    session.remove_from_cart(1).unwrap();
    let ids: Vec<i32> = session
        .render_cart()
        .items
        .iter()
        .map(|item| item.book_id.as_i32())
        .collect();
    assert_eq!(ids, vec![1, 1]);
    assert_eq!(session.cart_total(), Price::from_cents(6998));

    let outcome = session.checkout();
    assert_eq!(
        outcome,
        CheckoutOutcome::Placed {
            total: Price::from_cents(6998),
            item_count: 2
        }
    );
    assert_eq!(
        outcome.notification().message,
        "Order placed! Total: $69.98. Thank you for shopping with BookVerse! 🎉"
    );
    assert_eq!(session.cart_count(), 0);
}

#[tokio::test]
async fn test_unknown_book_leaves_cart_alone() {
    let server = TestServer::start().await.unwrap();
    let mut session = CartController::new(client_for(&server.url()));

    let err = session.add_to_cart(BookId::new(404)).await.unwrap_err();
    assert!(matches!(
        err,
        ControllerError::Cart(CartError::BookNotFound(_))
    ));
    assert!(err.is_silent());
    assert_eq!(session.cart_count(), 0);
}

#[tokio::test]
async fn test_get_book_not_found() {
    let server = TestServer::start().await.unwrap();
    let client = client_for(&server.url());

    let book = client.get_book(BookId::new(6)).await.unwrap();
    assert_eq!(book.title, "Sapiens");

    let err = client.get_book(BookId::new(99)).await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound(id) if id == BookId::new(99)));
}

#[tokio::test]
async fn test_browse_filters_live_listing() {
    let server = TestServer::start().await.unwrap();
    let session = CartController::new(client_for(&server.url()));

    let view = session.browse(&BookFilter::genre("fantasy").unwrap()).await;
    let titles: Vec<&str> = view.books().iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["The Hobbit"]);
}

#[tokio::test]
async fn test_catalog_down() {
    let url = closed_port_url().await.unwrap();
    let mut session = CartController::new(client_for(&url));

    assert_eq!(session.browse(&BookFilter::All).await, CatalogView::Unavailable);

    let err = session.add_to_cart(BookId::new(1)).await.unwrap_err();
    assert!(matches!(err, ControllerError::Catalog(_)));
    assert!(err.is_silent());
}

#[tokio::test]
async fn test_monitor_reads_live_slot() {
    let server = TestServer::start_with(bookverse_core::Catalog::seeded(), "green")
        .await
        .unwrap();
    let monitor = DeploymentMonitor::spawn(
        Arc::new(client_for(&server.url())),
        Duration::from_secs(10),
        Duration::from_secs(30),
    );

    let mut deployment = monitor.subscribe_deployment();
    tokio::time::timeout(
        Duration::from_secs(5),
        deployment.wait_for(Option::is_some),
    )
    .await
    .unwrap()
    .unwrap();

    let banner = monitor.banner().unwrap();
    assert!(banner.starts_with("🚀 Deployment: GREEN | Version: 2.1.0 | Host: "));

    let mut health = monitor.subscribe_health();
    tokio::time::timeout(
        Duration::from_secs(5),
        health.wait_for(|h| *h != HealthIndicator::Checking),
    )
    .await
    .unwrap()
    .unwrap();
    assert!(matches!(monitor.health(), HealthIndicator::Healthy(_)));

    monitor.shutdown().await;
}

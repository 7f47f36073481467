//! End-to-end tests through the client SDK.

use cars_sdk::{CarsClient, Fetched, ListFilter, NewCar};
use rust_decimal::Decimal;

mod common;

#[tokio::test]
async fn test_conditional_fetch_round_trip() {
    let svc = common::spawn_service().await;
    let client = CarsClient::new(&svc.base_url);

    let (car, etag) = match client.get(2, None).await.unwrap() {
        Fetched::Car { car, etag } => (car, etag.expect("etag header")),
        Fetched::NotModified => panic!("unconditional fetch returned 304"),
    };
    assert_eq!(car.model, "Mustang");
    assert_eq!(client.get(2, Some(&etag)).await.unwrap(), Fetched::NotModified);
}

#[tokio::test]
async fn test_create_then_list() {
    let svc = common::spawn_service().await;
    let client = CarsClient::new(&svc.base_url);

    let id = client
        .create(&NewCar {
            id: None,
            model: "Fusca".into(),
            name: "fusca classic".into(),
            price: Decimal::new(150000, 2),
        })
        .await
        .unwrap();
    assert_eq!(id, Some(5));
    assert_eq!(client.count().await.unwrap(), 5);

    let filter = ListFilter {
        name: Some("CLASSIC".into()),
        ..Default::default()
    };
    let cars = client.list(&filter).await.unwrap();
    assert_eq!(cars.len(), 1);
    assert_eq!(cars[0].price, Decimal::new(1500, 0));
}

#[tokio::test]
async fn test_errors_carry_status_and_message() {
    let svc = common::spawn_service().await;
    let client = CarsClient::new(&svc.base_url);

    let err = client
        .create(&NewCar {
            id: None,
            model: "dup".into(),
            name: "Porche274".into(),
            price: Decimal::ONE,
        })
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert!(err.to_string().contains("Car name must be unique"));

    let err = client.delete(3, Some("guest")).await.unwrap_err();
    assert_eq!(err.status(), Some(401));

    client.delete(3, Some("admin")).await.unwrap();
    assert_eq!(client.count().await.unwrap(), 3);
}

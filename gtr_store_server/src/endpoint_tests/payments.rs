use actix_web::{http::StatusCode, web, web::ServiceConfig};
use chrono::{TimeZone, Utc};
use gtr_common::Paise;
use gtr_store_engine::{
    db_types::{Order, OrderId, OrderStatus, PaymentStatus},
    store_api::{OrderFlowApi, OrderWithItems},
    traits::OrderFlowError,
};
use razorpay_tools::{RazorpayApiError, RazorpayOrder};

use super::{
    helpers::post_request,
    mocks::{MockGateway, MockShopDb},
};
use crate::routes::{PaymentOrderCreateRoute, PaymentVerifyRoute};

#[actix_web::test]
async fn payment_orders_are_created_at_the_gateway() {
    let _ = env_logger::try_init().ok();
    let (status, body) =
        post_request("/payments/create-order", r#"{"amount":1999.99}"#, gateway_accepts).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"id":"order_OG8xK2LqTzgXaV","amount":199999,"currency":"INR","key_id":"rzp_test_k3yId"}"#);
}

#[actix_web::test]
async fn receipts_pass_through_to_the_gateway() {
    let _ = env_logger::try_init().ok();
    let req = r#"{"amount":149.99,"currency":"INR","receipt":"rcpt_42"}"#;
    let (status, _body) = post_request("/payments/create-order", req, gateway_wants_a_receipt)
        .await
        .expect("Request failed");
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn gateway_failures_are_reported() {
    let _ = env_logger::try_init().ok();
    let (status, body) =
        post_request("/payments/create-order", r#"{"amount":100}"#, gateway_without_credentials)
            .await
            .expect("Request failed");
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, r#"{"error":"Failed to create Razorpay order: Gateway credentials have not been configured"}"#);
}

#[actix_web::test]
async fn verified_payments_confirm_the_order() {
    let _ = env_logger::try_init().ok();
    let req = r#"{"razorpay_order_id":"order_OG8xK2LqTzgXaV","razorpay_payment_id":"pay_OG8yAbCdEfGhIj","razorpay_signature":"9c1f0d2ab54fd8a3b1e6c07d54a2f4e8d90b3c6a1e5f28d47c09b8a6d3e2f1c0","order_id":"ORD-1718000000000-4F2A"}"#;
    let (status, body) = post_request("/payments/verify", req, signature_matches).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        r#"{"success":true,"message":"Payment verified successfully","order_id":"ORD-1718000000000-4F2A","payment_status":"paid"}"#
    );
}

#[actix_web::test]
async fn tampered_signatures_are_rejected() {
    let _ = env_logger::try_init().ok();
    let req = r#"{"razorpay_order_id":"order_OG8xK2LqTzgXaV","razorpay_payment_id":"pay_OG8yAbCdEfGhIj","razorpay_signature":"0000000000000000000000000000000000000000000000000000000000000000","order_id":"ORD-1718000000000-4F2A"}"#;
    let (status, body) = post_request("/payments/verify", req, signature_mismatch).await.expect("Request failed");
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"Invalid payment signature"}"#);
}

#[actix_web::test]
async fn unknown_orders_cannot_be_verified() {
    let _ = env_logger::try_init().ok();
    let req = r#"{"razorpay_order_id":"order_OG8xK2LqTzgXaV","razorpay_payment_id":"pay_OG8yAbCdEfGhIj","razorpay_signature":"9c1f0d2ab54fd8a3b1e6c07d54a2f4e8d90b3c6a1e5f28d47c09b8a6d3e2f1c0","order_id":"ORD-404"}"#;
    let (status, body) = post_request("/payments/verify", req, order_is_missing).await.expect("Request failed");
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, r#"{"error":"Order not found: ORD-404"}"#);
}

#[actix_web::test]
async fn shipping_details_are_recorded_with_the_payment() {
    let _ = env_logger::try_init().ok();
    let req = r#"{"razorpay_order_id":"order_OG8xK2LqTzgXaV","razorpay_payment_id":"pay_OG8yAbCdEfGhIj","razorpay_signature":"9c1f0d2ab54fd8a3b1e6c07d54a2f4e8d90b3c6a1e5f28d47c09b8a6d3e2f1c0","order_id":"ORD-1718000000000-4F2A","shipping_details":{"name":"Kai Desai","email":"kai@gtrmotors.example","phone":"+919900112233","address":"12 Harbour Lane","city":"Pune","state":"MH","zip":"411001"}}"#;
    let (status, _body) = post_request("/payments/verify", req, shipping_goes_to_pune).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
}

//-------------------------------------- Test app configurations ----------------------------------------------------

fn gateway_accepts(cfg: &mut ServiceConfig) {
    let mut gateway = MockGateway::new();
    gateway
        .expect_create_order()
        .withf(|amount, currency, receipt| {
            *amount == Paise::from(199_999) && currency == "INR" && receipt.is_none()
        })
        .returning(|amount, currency, _| {
            Ok(RazorpayOrder {
                id: "order_OG8xK2LqTzgXaV".to_string(),
                entity: "order".to_string(),
                amount: amount.value(),
                currency: currency.to_string(),
                receipt: None,
                status: "created".to_string(),
            })
        });
    gateway.expect_key_id().return_const("rzp_test_k3yId".to_string());
    register_payments(cfg, MockShopDb::new(), gateway);
}

fn gateway_wants_a_receipt(cfg: &mut ServiceConfig) {
    let mut gateway = MockGateway::new();
    gateway
        .expect_create_order()
        .withf(|amount, _, receipt| *amount == Paise::from(14_999) && receipt.as_deref() == Some("rcpt_42"))
        .returning(|amount, currency, receipt| {
            Ok(RazorpayOrder {
                id: "order_OG9aB3MrUahYbW".to_string(),
                entity: "order".to_string(),
                amount: amount.value(),
                currency: currency.to_string(),
                receipt,
                status: "created".to_string(),
            })
        });
    gateway.expect_key_id().return_const("rzp_test_k3yId".to_string());
    register_payments(cfg, MockShopDb::new(), gateway);
}

fn gateway_without_credentials(cfg: &mut ServiceConfig) {
    let mut gateway = MockGateway::new();
    gateway.expect_create_order().returning(|_, _, _| Err(RazorpayApiError::MissingCredentials));
    register_payments(cfg, MockShopDb::new(), gateway);
}

fn signature_matches(cfg: &mut ServiceConfig) {
    let mut gateway = MockGateway::new();
    gateway
        .expect_verify_signature()
        .withf(|oid, pid, sig| {
            oid == "order_OG8xK2LqTzgXaV" &&
                pid == "pay_OG8yAbCdEfGhIj" &&
                sig == "9c1f0d2ab54fd8a3b1e6c07d54a2f4e8d90b3c6a1e5f28d47c09b8a6d3e2f1c0"
        })
        .return_const(true);
    let mut db = MockShopDb::new();
    db.expect_confirm_payment()
        .withf(|id, conf| {
            id == &OrderId::from("ORD-1718000000000-4F2A") &&
                conf.razorpay_payment_id == "pay_OG8yAbCdEfGhIj" &&
                conf.shipping.is_none()
        })
        .returning(|_, _| Ok((paid_order(), true)));
    register_payments(cfg, db, gateway);
}

fn signature_mismatch(cfg: &mut ServiceConfig) {
    let mut gateway = MockGateway::new();
    gateway.expect_verify_signature().return_const(false);
    let mut db = MockShopDb::new();
    db.expect_confirm_payment().never();
    register_payments(cfg, db, gateway);
}

fn order_is_missing(cfg: &mut ServiceConfig) {
    let mut gateway = MockGateway::new();
    gateway.expect_verify_signature().return_const(true);
    let mut db = MockShopDb::new();
    db.expect_confirm_payment()
        .returning(|id, _| Err(OrderFlowError::OrderNotFound(id.clone())));
    register_payments(cfg, db, gateway);
}

fn shipping_goes_to_pune(cfg: &mut ServiceConfig) {
    let mut gateway = MockGateway::new();
    gateway.expect_verify_signature().return_const(true);
    let mut db = MockShopDb::new();
    db.expect_confirm_payment()
        .withf(|_, conf| conf.shipping.as_ref().map(|s| s.city.as_str()) == Some("Pune"))
        .returning(|_, _| Ok((paid_order(), true)));
    register_payments(cfg, db, gateway);
}

fn register_payments(cfg: &mut ServiceConfig, db: MockShopDb, gateway: MockGateway) {
    let api = OrderFlowApi::new(db);
    cfg.service(PaymentOrderCreateRoute::<MockGateway>::new())
        .service(PaymentVerifyRoute::<MockShopDb, MockGateway>::new())
        .app_data(web::Data::new(api))
        .app_data(web::Data::new(gateway));
}

//--------------------------------------       Fixtures        ------------------------------------------------------

// Mock response to the `confirm_payment` call. Line items are not part of the verification response, so the
// fixture carries none.
fn paid_order() -> OrderWithItems {
    let order = Order {
        id: OrderId::from("ORD-1718000000000-4F2A"),
        created_at: Utc.with_ymd_and_hms(2024, 6, 10, 6, 13, 20).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2024, 6, 10, 6, 20, 0).unwrap(),
        status: OrderStatus::Confirmed,
        total_price: Paise::from(229_997),
        payment_status: PaymentStatus::Paid,
        razorpay_order_id: Some("order_OG8xK2LqTzgXaV".to_string()),
        razorpay_payment_id: Some("pay_OG8yAbCdEfGhIj".to_string()),
        razorpay_signature: Some("9c1f0d2ab54fd8a3b1e6c07d54a2f4e8d90b3c6a1e5f28d47c09b8a6d3e2f1c0".to_string()),
        customer_name: None,
        customer_email: None,
        customer_phone: None,
        shipping_address: None,
        shipping_city: None,
        shipping_state: None,
        shipping_zip: None,
    };
    OrderWithItems::new(order, vec![])
}

use async_trait::async_trait;
use cafe_storefront::checkout::{CheckoutError, Redirect};
use cafe_storefront::clients::{
    CheckoutGateway, CheckoutSession, CheckoutSessionId, GatewayError,
};
use cafe_storefront::lifecycle::{StorefrontConfig, StorefrontSystem};
use cafe_storefront::model::{CartLine, CustomerInfo, Field, FieldError, ItemId};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Records what it was asked to charge; optionally refuses.
#[derive(Default)]
struct RecordingGateway {
    refuse: bool,
    requests: Mutex<Vec<(Vec<CartLine>, CustomerInfo)>>,
}

#[async_trait]
impl CheckoutGateway for RecordingGateway {
    async fn create_session(
        &self,
        lines: &[CartLine],
        customer: &CustomerInfo,
    ) -> Result<CheckoutSession, GatewayError> {
        self.requests
            .lock()
            .unwrap()
            .push((lines.to_vec(), customer.clone()));
        if self.refuse {
            return Err(GatewayError::Status {
                status: 500,
                message: "Error creating checkout session".into(),
            });
        }
        Ok(CheckoutSession {
            session_id: CheckoutSessionId("cs_test_1".into()),
        })
    }
}

fn customer() -> CustomerInfo {
    CustomerInfo::new("Ada Lovelace", "ada@example.com", "+14155550123")
}

async fn system_with_cart() -> (StorefrontSystem, cafe_storefront::cart_actor::SessionId) {
    let system = StorefrontSystem::new(StorefrontConfig::default()).unwrap();
    let session = system.cart_client.open_session().await.unwrap();
    let mocha = system.catalog().get(&ItemId::from("sig-1")).cloned().unwrap();
    system.cart_client.add_item(session, mocha).await.unwrap();
    (system, session)
}

#[tokio::test]
async fn test_checkout_then_confirm_clears_cart() {
    let (system, session) = system_with_cart().await;
    let gateway = Arc::new(RecordingGateway::default());
    let flow = system.checkout(gateway.clone());

    let checkout = flow.begin(session, &customer()).await.unwrap();
    assert_eq!(checkout.session_id.to_string(), "cs_test_1");
    {
        let requests = gateway.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0[0].id(), &ItemId::from("sig-1"));
        assert_eq!(requests[0].1.email, "ada@example.com");
    }
    // Starting checkout leaves the cart alone.
    assert!(!system.cart_client.snapshot(session).await.unwrap().is_empty());

    let redirect = flow.confirm(session).await.unwrap();
    assert_eq!(
        redirect,
        Redirect {
            to: "/".into(),
            after: Duration::from_secs(5),
        }
    );
    assert!(system.cart_client.snapshot(session).await.unwrap().is_empty());

    drop(flow);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_gateway_failure_keeps_cart() {
    let (system, session) = system_with_cart().await;
    let before = system.cart_client.snapshot(session).await.unwrap();
    let flow = system.checkout(Arc::new(RecordingGateway {
        refuse: true,
        ..Default::default()
    }));

    let err = flow.begin(session, &customer()).await.unwrap_err();
    assert!(matches!(err, CheckoutError::Gateway(_)));
    assert_eq!(err.user_message(), "Something went wrong. Please try again.");
    assert_eq!(system.cart_client.snapshot(session).await.unwrap(), before);

    drop(flow);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_invalid_customer_never_reaches_gateway() {
    let (system, session) = system_with_cart().await;
    let gateway = Arc::new(RecordingGateway::default());
    let flow = system.checkout(gateway.clone());

    let bad = CustomerInfo::new("", "not-an-email", "0123");
    let err = flow.begin(session, &bad).await.unwrap_err();
    match err {
        CheckoutError::Validation(errors) => {
            assert_eq!(errors.errors.len(), 3);
            assert_eq!(errors.for_field(Field::Email), Some(&FieldError::InvalidEmail));
        }
        other => panic!("Expected validation error, got {other:?}"),
    }
    assert!(gateway.requests.lock().unwrap().is_empty());

    drop(flow);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_empty_cart_is_refused() {
    let system = StorefrontSystem::new(StorefrontConfig::default()).unwrap();
    let session = system.cart_client.open_session().await.unwrap();
    let gateway = Arc::new(RecordingGateway::default());
    let flow = system.checkout(gateway.clone());

    let err = flow.begin(session, &customer()).await.unwrap_err();
    assert!(matches!(err, CheckoutError::EmptyCart));
    assert!(gateway.requests.lock().unwrap().is_empty());

    drop(flow);
    system.shutdown().await.unwrap();
}

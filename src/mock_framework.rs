//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_get`] or [`expect_action`] to assert behavior
//! and answer each request by hand.

use crate::actor_framework::{Entity, ResourceClient, ResourceRequest, Response};
use tokio::sync::mpsc;

/// Creates a mock client and a receiver for asserting requests.
///
/// The client talks to a channel the test owns instead of a running
/// `ResourceActor`, so orchestration code such as `OrderClient::create_order`
/// can be driven one request at a time with any reply, including failures.
pub fn create_mock_client<T: Entity>(buffer_size: usize) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::CreatePayload, Response<T::Id, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { payload, respond_to }) => Some((payload, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Response<Option<T>, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a List request
pub async fn expect_list<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<Response<Vec<T>, T::Error>> {
    match receiver.recv().await {
        Some(ResourceRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, Response<T::ActionResult, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action { id, action, respond_to }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::ProductClient;
    use crate::domain::Product;
    use crate::product_actor::ProductCreate;

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<Product>(10);

        let create_task = tokio::spawn(async move {
            client.create(ProductCreate::new("Falcon X8", "Survey", 100_000, 4)).await
        });

        let (payload, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(payload.name, "Falcon X8");
        responder.send(Ok("product_1".to_string())).unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result, Ok("product_1".to_string()));
    }

    #[tokio::test]
    async fn test_mock_list_feeds_client_filtering() {
        let (inner, mut receiver) = create_mock_client::<Product>(10);
        let client = ProductClient::new(inner);
        let list_task = tokio::spawn(async move { client.list_active_products().await });

        let responder = expect_list(&mut receiver).await.expect("Expected List request");
        let mut hidden = Product::new("p2", "Retired Hawk", "Survey", 90_000, 0);
        hidden.is_active = false;
        let mut second = Product::new("p3", "Agri Sprayer", "Agriculture", 450_000, 2);
        second.order = 1;
        let first = Product::new("p1", "Falcon X8", "Survey", 100_000, 4);
        responder.send(Ok(vec![second, hidden, first])).unwrap();

        let listed = list_task.await.unwrap().unwrap();
        let ids: Vec<_> = listed.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["p1", "p3"]);
    }
}

use canteen_kiosk::clients::OrderClient;
use canteen_kiosk::default_menu::default_menu;
use canteen_kiosk::model::{CartItem, Order, OrderCreate, OrderStatus, PaymentMethod};
use canteen_kiosk::order_actor::{self, OrderError, StatusChange, TransitionPolicy};
use collection_framework::{ChangeEvent, CollectionClient};
use tokio::task::JoinHandle;

fn spawn_orders(policy: TransitionPolicy) -> (OrderClient, JoinHandle<()>) {
    let (actor, client) = order_actor::new(8);
    let handle = tokio::spawn(actor.run(policy));
    (OrderClient::new(client), handle)
}

fn line(name: &str, quantity: u32) -> CartItem {
    let item = default_menu()
        .into_iter()
        .find(|i| i.name == name)
        .expect("dish exists");
    CartItem { item, quantity }
}

fn checkout(items: Vec<CartItem>) -> OrderCreate {
    OrderCreate {
        student_id: "anon-1".to_string(),
        student_name: "Riya (ID: 21CS042)".to_string(),
        roll_no: "21CS042".to_string(),
        token_number: "#4821".to_string(),
        items,
        payment_method: Some(PaymentMethod::Upi),
        timestamp: 1_704_110_400_000,
    }
}

/// Integration test: the real order actor prices and stores a checkout.
#[tokio::test]
async fn test_order_is_created_pending_with_computed_total() {
    let (orders, handle) = spawn_orders(TransitionPolicy::Strict);

    let id = orders
        .place_order(checkout(vec![
            line("Veg Biryani", 2),
            line("Veg Cutlet (2 pcs)", 1),
        ]))
        .await
        .expect("Failed to place order");

    let order = orders.get(id.clone()).await.unwrap().expect("order stored");
    assert_eq!(order.id, id);
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.total_amount, 280.0);
    assert_eq!(order.item_count(), 3);
    assert_eq!(order.token_number, "#4821");
    assert_eq!(order.timestamp, 1_704_110_400_000);

    drop(orders);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_empty_order_is_rejected() {
    let (orders, handle) = spawn_orders(TransitionPolicy::Strict);

    let err = orders.place_order(checkout(Vec::new())).await.unwrap_err();
    assert_eq!(err, OrderError::EmptyOrder);
    assert!(orders.list().await.unwrap().is_empty());

    drop(orders);
    handle.await.unwrap();
}

/// Walks an order along the kitchen path and checks every step is published.
#[tokio::test]
async fn test_kitchen_path_is_published() {
    let (orders, handle) = spawn_orders(TransitionPolicy::Strict);
    let id = orders
        .place_order(checkout(vec![line("Masala Chai", 1)]))
        .await
        .unwrap();

    let mut feed = orders.inner().subscribe().await.unwrap();
    assert_eq!(feed.snapshot.len(), 1);

    let mut status = OrderStatus::Pending;
    while let Some(next) = status.next() {
        let change = orders.update_status(id.clone(), next).await.unwrap();
        assert_eq!(change, StatusChange { from: status, to: next });

        match feed.events.recv().await.unwrap() {
            ChangeEvent::Modified(order) => assert_eq!(order.status, next),
            other => panic!("unexpected event {other:?}"),
        }
        status = next;
    }
    assert_eq!(status, OrderStatus::Completed);

    drop(feed);
    drop(orders);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_strict_policy_keeps_terminal_orders_closed() {
    let (orders, handle) = spawn_orders(TransitionPolicy::Strict);
    let id = orders
        .place_order(checkout(vec![line("Vada Pav", 1)]))
        .await
        .unwrap();

    orders
        .update_status(id.clone(), OrderStatus::Cancelled)
        .await
        .unwrap();
    let err = orders
        .update_status(id.clone(), OrderStatus::Preparing)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        OrderError::InvalidTransition {
            from: OrderStatus::Cancelled,
            to: OrderStatus::Preparing
        }
    );

    let order: Order = orders.get(id).await.unwrap().unwrap();
    assert_eq!(order.status, OrderStatus::Cancelled);

    drop(orders);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_unchecked_policy_applies_any_status() {
    let (orders, handle) = spawn_orders(TransitionPolicy::Unchecked);
    let id = orders
        .place_order(checkout(vec![line("Vada Pav", 1)]))
        .await
        .unwrap();

    let change = orders
        .update_status(id.clone(), OrderStatus::Completed)
        .await
        .unwrap();
    assert_eq!(change.from, OrderStatus::Pending);

    let change = orders
        .update_status(id.clone(), OrderStatus::Preparing)
        .await
        .unwrap();
    assert_eq!(
        change,
        StatusChange {
            from: OrderStatus::Completed,
            to: OrderStatus::Preparing
        }
    );

    drop(orders);
    handle.await.unwrap();
}

/// Orders are history: no patching and no deleting, whatever the policy.
#[tokio::test]
async fn test_orders_cannot_be_patched_or_deleted() {
    let (orders, handle) = spawn_orders(TransitionPolicy::Unchecked);
    let id = orders
        .place_order(checkout(vec![line("Samosa (2 pcs)", 3)]))
        .await
        .unwrap();

    let err = orders.delete(id.clone()).await.unwrap_err();
    assert_eq!(err, OrderError::DeleteForbidden(id.to_string()));

    let err = orders.inner().update(id.clone(), ()).await.unwrap_err();
    assert_eq!(
        err.entity_error::<OrderError>(),
        Some(&OrderError::ImmutableOrder(id.to_string()))
    );

    let order = orders.get(id.clone()).await.unwrap().unwrap();
    assert_eq!(order.total_amount, 90.0);

    let err = orders
        .update_status("missing".into(), OrderStatus::Ready)
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::NotFound(_)));

    drop(orders);
    handle.await.unwrap();
}

use canteen_kiosk::auth::InMemoryAuth;
use canteen_kiosk::clients::{MenuClient, OrderClient};
use canteen_kiosk::config::KioskConfig;
use canteen_kiosk::insights::StaticAnalyst;
use canteen_kiosk::menu_actor::{self, MenuError};
use canteen_kiosk::model::{
    CartItem, Category, MenuItem, MenuItemCreate, MenuItemUpdate, Order, OrderCreate, OrderId,
    OrderStatus, PaymentMethod,
};
use canteen_kiosk::order_actor::{OrderError, TransitionPolicy};
use canteen_kiosk::state::{NotificationKind, View};
use canteen_kiosk::views::HistoryFilter;
use canteen_kiosk::{Kiosk, KioskError, KioskSystem};
use chrono::{Datelike, Utc};
use collection_framework::mock::MockClient;
use collection_framework::{CollectionClient, FrameworkError};
use std::sync::Arc;
use std::time::Duration;

const ADMIN: &str = "admin@canteen.in";
const PASSWORD: &str = "canteen123";

async fn boot(policy: TransitionPolicy) -> KioskSystem {
    boot_with(KioskConfig {
        status_policy: policy,
        ..KioskConfig::default()
    })
    .await
}

async fn boot_with(config: KioskConfig) -> KioskSystem {
    let system = KioskSystem::with_services(
        config,
        Arc::new(InMemoryAuth::new()),
        Arc::new(StaticAnalyst("Chai sells best".to_string())),
    )
    .await
    .expect("Failed to start kiosk");

    let kiosk = &system.kiosk;
    kiosk.login_admin(ADMIN, PASSWORD).await.expect("Admin login failed");
    assert_eq!(kiosk.reset_menu().await.expect("Reset failed"), 40);
    kiosk.logout().await;
    kiosk
        .watch_menu()
        .wait_for(|menu| menu.len() == 40)
        .await
        .expect("Menu mirror stopped");
    system
}

fn dish(kiosk: &Kiosk, name: &str) -> MenuItem {
    kiosk
        .menu()
        .iter()
        .find(|item| item.name == name)
        .cloned()
        .unwrap_or_else(|| panic!("{name} not on the menu"))
}

async fn wait_for_orders(kiosk: &Kiosk, check: impl Fn(&[Order]) -> bool) -> Arc<Vec<Order>> {
    let mut orders = kiosk.watch_orders().await.expect("Not signed in");
    let snapshot = orders
        .wait_for(|o| check(o))
        .await
        .expect("Orders mirror stopped")
        .clone();
    snapshot
}

async fn place(kiosk: &Kiosk, name: &str, roll: &str, dishes: &[&str]) -> String {
    kiosk.login_student(name, roll).await.expect("Student login failed");
    for d in dishes {
        kiosk.add_to_cart(&dish(kiosk, d)).expect("Add to cart failed");
    }
    let token = kiosk
        .place_order(Some(PaymentMethod::Cash))
        .await
        .expect("Order failed");
    kiosk.logout().await;
    token
}

#[tokio::test]
async fn test_student_order_is_priced_and_tokened() {
    let system = boot(TransitionPolicy::Strict).await;
    let kiosk = system.kiosk.clone();

    let session = kiosk.login_student("Riya Sharma", "21CS042").await.unwrap();
    assert_eq!(kiosk.state().view, View::Menu);

    kiosk.add_to_cart(&dish(&kiosk, "Veg Biryani")).unwrap();
    kiosk.add_to_cart(&dish(&kiosk, "Veg Biryani")).unwrap();
    kiosk.add_to_cart(&dish(&kiosk, "Veg Cutlet (2 pcs)")).unwrap();
    assert_eq!(kiosk.state().cart.total(), 280.0);

    let token = kiosk.place_order(Some(PaymentMethod::Upi)).await.unwrap();
    assert_eq!(token.len(), 5);
    assert!(token.starts_with('#'));
    let number: u32 = token[1..].parse().unwrap();
    assert!((1000..=9999).contains(&number));

    let state = kiosk.state();
    assert!(state.cart.is_empty());
    assert!(!state.processing);
    assert_eq!(
        state.view,
        View::OrderSuccess {
            token: token.clone(),
            seconds_left: 10
        }
    );

    let orders = wait_for_orders(&kiosk, |o| o.len() == 1).await;
    let order = &orders[0];
    assert_eq!(order.total_amount, 280.0);
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.student_id, session.uid);
    assert_eq!(order.student_name, "Riya Sharma (ID: 21CS042)");
    assert_eq!(order.roll_no, "21CS042");
    assert_eq!(order.token_number, token);
    assert_eq!(order.payment_method, Some(PaymentMethod::Upi));
    assert_eq!(order.item_count(), 3);

    kiosk.logout().await;
    drop(kiosk);
    system.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn test_order_total_survives_price_changes() {
    let system = boot(TransitionPolicy::Strict).await;
    let kiosk = system.kiosk.clone();
    place(&kiosk, "Riya", "1", &["Masala Chai", "Masala Chai"]).await;

    kiosk.login_admin(ADMIN, PASSWORD).await.unwrap();
    let chai = dish(&kiosk, "Masala Chai");
    let update = MenuItemUpdate {
        price: Some(25.0),
        ..Default::default()
    };
    let edited = kiosk.edit_menu_item(chai.id.clone(), update).await.unwrap();
    assert_eq!(edited.price, 25.0);
    assert_eq!(edited.image_url, chai.image_url);

    let orders = wait_for_orders(&kiosk, |o| o.len() == 1).await;
    assert_eq!(orders[0].total_amount, 30.0);
    assert_eq!(orders[0].items[0].item.price, 15.0);

    kiosk.logout().await;
    drop(kiosk);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_students_see_only_their_own_orders() {
    let system = boot(TransitionPolicy::Strict).await;
    let kiosk = system.kiosk.clone();

    place(&kiosk, "Arjun", "21CS077", &["Vada Pav", "Cold Coffee"]).await;
    // Newer than anything placed below, so it would sort first if it leaked through.
    let later = Utc::now().timestamp_millis() + 3_600_000;
    system
        .order_client
        .place_order(OrderCreate {
            student_id: "anon-meera".to_string(),
            student_name: "Meera (ID: 21CS101)".to_string(),
            roll_no: "21CS101".to_string(),
            token_number: "#1111".to_string(),
            items: vec![CartItem {
                item: dish(&kiosk, "Masala Chai"),
                quantity: 1,
            }],
            payment_method: None,
            timestamp: later,
        })
        .await
        .unwrap();

    let riya = kiosk.login_student("Riya", "21CS042").await.unwrap();
    assert!(kiosk.orders().await.is_empty());
    kiosk.add_to_cart(&dish(&kiosk, "Veg Puff")).unwrap();
    let token = kiosk.place_order(None).await.unwrap();

    let own = wait_for_orders(&kiosk, |o| !o.is_empty()).await;
    assert_eq!(own.len(), 1);
    assert_eq!(own[0].student_id, riya.uid);
    assert_eq!(own[0].token_number, token);
    assert_eq!(kiosk.active_queue().await.len(), 1);
    kiosk.logout().await;

    kiosk.login_admin(ADMIN, PASSWORD).await.unwrap();
    let all = wait_for_orders(&kiosk, |o| o.len() == 3).await;
    assert_eq!(all[0].timestamp, later);
    assert!(all.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    assert_eq!(kiosk.dashboard().await.active_orders, 3);

    kiosk.logout().await;
    assert!(kiosk.watch_orders().await.is_none());
    assert!(kiosk.orders().await.is_empty());

    drop(kiosk);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_kitchen_fulfilment_and_sales_views() {
    let system = boot(TransitionPolicy::Strict).await;
    let kiosk = system.kiosk.clone();

    place(&kiosk, "Riya", "21CS042", &["Veg Biryani"]).await;
    let cancelled = place(&kiosk, "Arjun", "21CS077", &["Chicken Biryani"]).await;
    place(&kiosk, "Meera", "21CS101", &["Masala Chai"]).await;

    kiosk.login_admin(ADMIN, PASSWORD).await.unwrap();
    let orders = wait_for_orders(&kiosk, |o| o.len() == 3).await;
    // Tokens are random and may repeat, roll numbers do not.
    let by_roll = |roll: &str| orders.iter().find(|o| o.roll_no == roll).unwrap().id.clone();

    let done_id = by_roll("21CS042");
    for status in [OrderStatus::Preparing, OrderStatus::Ready, OrderStatus::Completed] {
        kiosk.update_order_status(done_id.clone(), status).await.unwrap();
    }
    assert_eq!(
        kiosk.state().notification.unwrap().message,
        "Order status updated to COMPLETED"
    );
    kiosk
        .update_order_status(by_roll("21CS077"), OrderStatus::Cancelled)
        .await
        .unwrap();

    let orders = wait_for_orders(&kiosk, |o| {
        o.iter().filter(|o| o.status.is_terminal()).count() == 2
    })
    .await;

    let queue = kiosk.active_queue().await;
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0].student_name, "Meera (ID: 21CS101)");

    let rollup = kiosk.revenue_rollup_in(&Utc).await;
    let revenue: f64 = rollup.iter().map(|b| b.revenue).sum();
    let count: u32 = rollup.iter().map(|b| b.orders).sum();
    assert_eq!(revenue, 135.0);
    assert_eq!(count, 2);
    let day = orders[0].created_at().unwrap().weekday().to_string();
    assert!(rollup.iter().any(|b| b.name == day));
    assert_eq!(kiosk.dashboard().await.revenue, 135.0);

    kiosk.set_history_filter(HistoryFilter {
        search: "21cs077".to_string(),
        status: Some(OrderStatus::Cancelled),
    });
    let history = kiosk.history().await;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].roll_no, "21CS077");
    assert_eq!(history[0].token_number, cancelled);

    assert_eq!(kiosk.analyze_sales().await.unwrap(), "Chai sells best");
    assert_eq!(kiosk.state().analysis.as_deref(), Some("Chai sells best"));

    kiosk.logout().await;
    drop(kiosk);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_strict_policy_rejects_out_of_table_transitions() {
    let system = boot(TransitionPolicy::Strict).await;
    let kiosk = system.kiosk.clone();
    place(&kiosk, "Riya", "1", &["Veg Puff"]).await;

    kiosk.login_admin(ADMIN, PASSWORD).await.unwrap();
    let id = wait_for_orders(&kiosk, |o| o.len() == 1).await[0].id.clone();

    let err = kiosk
        .update_order_status(id.clone(), OrderStatus::Completed)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        KioskError::Order(OrderError::InvalidTransition {
            from: OrderStatus::Pending,
            to: OrderStatus::Completed
        })
    ));
    let notification = kiosk.state().notification.unwrap();
    assert_eq!(notification.kind, NotificationKind::Error);
    assert_eq!(notification.message, "Failed to update status");

    let stored = system.order_client.get(id).await.unwrap().unwrap();
    assert_eq!(stored.status, OrderStatus::Pending);

    kiosk.logout().await;
    drop(kiosk);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_unchecked_policy_overwrites_status() {
    let system = boot(TransitionPolicy::Unchecked).await;
    let kiosk = system.kiosk.clone();
    place(&kiosk, "Riya", "1", &["Veg Puff"]).await;

    kiosk.login_admin(ADMIN, PASSWORD).await.unwrap();
    let id = wait_for_orders(&kiosk, |o| o.len() == 1).await[0].id.clone();

    kiosk
        .update_order_status(id.clone(), OrderStatus::Completed)
        .await
        .unwrap();
    kiosk
        .update_order_status(id.clone(), OrderStatus::Pending)
        .await
        .unwrap();
    let stored = system.order_client.get(id).await.unwrap().unwrap();
    assert_eq!(stored.status, OrderStatus::Pending);

    kiosk.logout().await;
    drop(kiosk);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_students_cannot_run_the_kitchen() {
    let system = boot(TransitionPolicy::Strict).await;
    let kiosk = system.kiosk.clone();
    kiosk.login_student("Riya", "1").await.unwrap();

    let chai = dish(&kiosk, "Masala Chai");
    assert!(matches!(
        kiosk.toggle_availability(chai.id.clone()).await,
        Err(KioskError::Forbidden)
    ));
    assert!(matches!(kiosk.reset_menu().await, Err(KioskError::Forbidden)));
    assert!(matches!(kiosk.show_history(), Err(KioskError::Forbidden)));
    assert!(dish(&kiosk, "Masala Chai").is_available);

    kiosk.logout().await;
    assert!(matches!(
        kiosk.place_order(None).await,
        Err(KioskError::NotSignedIn)
    ));

    drop(kiosk);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_sold_out_dishes_cannot_be_ordered() {
    let system = boot(TransitionPolicy::Strict).await;
    let kiosk = system.kiosk.clone();
    kiosk.login_admin(ADMIN, PASSWORD).await.unwrap();

    let coffee = dish(&kiosk, "Cold Coffee");
    assert!(!kiosk.toggle_availability(coffee.id.clone()).await.unwrap());
    assert_eq!(
        kiosk.state().notification.unwrap().message,
        "Cold Coffee is now Sold Out"
    );
    kiosk
        .watch_menu()
        .wait_for(|m| m.iter().any(|i| i.id == coffee.id && !i.is_available))
        .await
        .unwrap();
    kiosk.logout().await;

    kiosk.login_student("Riya", "1").await.unwrap();
    let err = kiosk.add_to_cart(&dish(&kiosk, "Cold Coffee")).unwrap_err();
    assert!(matches!(err, KioskError::Cart(_)));
    assert!(kiosk.state().cart.is_empty());
    assert!(matches!(
        kiosk.place_order(None).await,
        Err(KioskError::Checkout(_))
    ));
    kiosk.logout().await;

    kiosk.login_admin(ADMIN, PASSWORD).await.unwrap();
    assert!(kiosk.toggle_availability(coffee.id).await.unwrap());

    kiosk.logout().await;
    drop(kiosk);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_menu_administration() {
    let system = boot(TransitionPolicy::Strict).await;
    let kiosk = system.kiosk.clone();
    kiosk.login_admin(ADMIN, PASSWORD).await.unwrap();

    let mut params = MenuItemCreate::new(
        "Pav Bhaji",
        "Buttery mashed vegetable curry with pav.",
        70.0,
        Category::MainCourse,
    );
    // A new dish goes on sale straight away, whatever the form said.
    params.is_available = false;
    let id = kiosk.add_menu_item(params).await.unwrap();
    let menu = kiosk
        .watch_menu()
        .wait_for(|m| m.len() == 41)
        .await
        .unwrap()
        .clone();
    let added = menu.iter().find(|i| i.id == id).unwrap();
    assert!(added.is_available);
    assert!(added.image_url.contains("Pav%20Bhaji"));

    let renamed = kiosk
        .edit_menu_item(
            id.clone(),
            MenuItemUpdate {
                name: Some("Butter Pav Bhaji".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(renamed.image_url.contains("Butter%20Pav%20Bhaji"));

    let err = kiosk
        .edit_menu_item(
            id.clone(),
            MenuItemUpdate {
                price: Some(-5.0),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, KioskError::Menu(MenuError::InvalidPrice(_))));

    kiosk
        .watch_menu()
        .wait_for(|m| m.iter().any(|i| i.name == "Butter Pav Bhaji"))
        .await
        .unwrap();
    kiosk.delete_menu_item(id.clone()).await.unwrap();
    assert_eq!(
        kiosk.state().notification.unwrap().message,
        "Butter Pav Bhaji deleted"
    );
    assert!(system.menu_client.get(id).await.unwrap().is_none());

    kiosk.logout().await;
    drop(kiosk);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_reset_menu_is_all_or_nothing() {
    let (actor, generic_client) = menu_actor::new(8);
    let handle = tokio::spawn(actor.run(()));
    let menu = MenuClient::new(generic_client);

    let kept = menu
        .add_item(MenuItemCreate::new("Kulfi", "Frozen milk dessert.", 35.0, Category::Dessert))
        .await
        .unwrap();

    let mut replacement = canteen_kiosk::default_menu::default_menu();
    replacement[17].price = -1.0;
    let err = menu.reset_menu(replacement).await.unwrap_err();
    assert_eq!(err, MenuError::InvalidPrice(-1.0));

    let items = menu.list().await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, kept);

    assert_eq!(
        menu.reset_menu(canteen_kiosk::default_menu::default_menu())
            .await
            .unwrap(),
        40
    );
    let items = menu.list().await.unwrap();
    assert_eq!(items.len(), 40);
    assert!(items.iter().all(|i| i.id != kept));

    drop(menu);
    handle.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_countdown_signs_the_student_out() {
    let system = boot(TransitionPolicy::Strict).await;
    let kiosk = system.kiosk.clone();

    kiosk.login_student("Riya", "21CS042").await.unwrap();
    kiosk.add_to_cart(&dish(&kiosk, "Samosa (2 pcs)")).unwrap();
    let started = tokio::time::Instant::now();
    kiosk.place_order(None).await.unwrap();
    assert!(kiosk.session().is_some());

    kiosk
        .watch_state()
        .wait_for(|s| s.session.is_none())
        .await
        .unwrap();
    assert!(started.elapsed() >= Duration::from_secs(10));
    let after = kiosk.state();
    assert_eq!(after.view, View::Login);
    assert_eq!(after.notification.unwrap().message, "Ready for next student");
    assert!(kiosk.watch_orders().await.is_none());

    drop(kiosk);
    system.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_done_button_skips_the_countdown() {
    let system = boot(TransitionPolicy::Strict).await;
    let kiosk = system.kiosk.clone();

    kiosk.login_student("Riya", "21CS042").await.unwrap();
    kiosk.add_to_cart(&dish(&kiosk, "Vada Pav")).unwrap();
    kiosk.place_order(None).await.unwrap();

    let started = tokio::time::Instant::now();
    kiosk.finish_countdown().await;
    kiosk
        .watch_state()
        .wait_for(|s| s.session.is_none())
        .await
        .unwrap();
    assert!(started.elapsed() < Duration::from_secs(1));

    drop(kiosk);
    system.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_manual_logout_stops_the_countdown() {
    let system = boot(TransitionPolicy::Strict).await;
    let kiosk = system.kiosk.clone();

    kiosk.login_student("Riya", "21CS042").await.unwrap();
    kiosk.add_to_cart(&dish(&kiosk, "Vada Pav")).unwrap();
    kiosk.place_order(None).await.unwrap();
    kiosk.logout().await;

    // The next student signs in before the old countdown would have expired.
    let next = kiosk.login_student("Arjun", "21CS077").await.unwrap();
    tokio::time::sleep(Duration::from_secs(15)).await;
    assert_eq!(kiosk.session(), Some(next));
    assert_eq!(kiosk.state().view, View::Menu);

    kiosk.logout().await;
    drop(kiosk);
    system.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_zero_second_countdown_signs_out_at_once() {
    let system = boot_with(KioskConfig {
        logout_seconds: 0,
        ..KioskConfig::default()
    })
    .await;
    let kiosk = system.kiosk.clone();

    kiosk.login_student("Riya", "21CS042").await.unwrap();
    kiosk.add_to_cart(&dish(&kiosk, "Masala Chai")).unwrap();
    kiosk.place_order(None).await.unwrap();

    let mut state = kiosk.watch_state();
    let waited = tokio::time::timeout(
        Duration::from_secs(3),
        state.wait_for(|s| s.session.is_none()),
    )
    .await;
    assert!(matches!(waited, Ok(Ok(_))), "student still signed in");
    drop(waited);
    assert_eq!(kiosk.state().view, View::Login);

    drop(kiosk);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_failed_order_keeps_the_tray() {
    let (menu_actor, menu_resource) = menu_actor::new(8);
    let menu_handle = tokio::spawn(menu_actor.run(()));
    let menu = MenuClient::new(menu_resource);
    menu.reset_menu(canteen_kiosk::default_menu::default_menu())
        .await
        .unwrap();

    let mut orders = MockClient::<Order>::new();
    let _feed = orders.expect_subscribe(Vec::new());
    orders.expect_create().return_err(FrameworkError::ActorClosed);

    let kiosk = Kiosk::new(
        menu.clone(),
        OrderClient::new(orders.client()),
        Arc::new(InMemoryAuth::new()),
        Arc::new(StaticAnalyst::default()),
        KioskConfig::default(),
    )
    .await
    .unwrap();

    kiosk.login_student("Riya", "21CS042").await.unwrap();
    let chai = menu
        .list()
        .await
        .unwrap()
        .into_iter()
        .find(|i| i.name == "Masala Chai")
        .unwrap();
    kiosk.add_to_cart(&chai).unwrap();

    let err = kiosk.place_order(Some(PaymentMethod::Card)).await.unwrap_err();
    assert!(matches!(
        err,
        KioskError::Order(OrderError::ActorCommunicationError(_))
    ));

    let state = kiosk.state();
    assert_eq!(state.cart.item_count(), 1);
    assert!(!state.processing);
    assert_eq!(state.view, View::Menu);
    let notification = state.notification.unwrap();
    assert_eq!(notification.kind, NotificationKind::Error);
    assert_eq!(notification.message, "Failed to place order. Try again.");
    orders.verify();

    kiosk.close().await;
    drop(kiosk);
    drop(menu);
    menu_handle.await.unwrap();
}

/// A sign-in whose order feed cannot be opened leaves the current student, and their
/// pending sign-out, as they were.
#[tokio::test(start_paused = true)]
async fn test_failed_sign_in_keeps_the_current_session() {
    let (menu_actor, menu_resource) = menu_actor::new(8);
    let menu_handle = tokio::spawn(menu_actor.run(()));
    let menu = MenuClient::new(menu_resource);
    menu.reset_menu(canteen_kiosk::default_menu::default_menu())
        .await
        .unwrap();

    let mut orders = MockClient::<Order>::new();
    let _feed = orders.expect_subscribe(Vec::new());
    orders.expect_create().return_ok(OrderId::from("o1"));
    orders.expect_subscribe_err(FrameworkError::ActorClosed);

    let kiosk = Kiosk::new(
        menu.clone(),
        OrderClient::new(orders.client()),
        Arc::new(InMemoryAuth::new()),
        Arc::new(StaticAnalyst::default()),
        KioskConfig::default(),
    )
    .await
    .unwrap();

    let riya = kiosk.login_student("Riya", "21CS042").await.unwrap();
    let chai = menu
        .list()
        .await
        .unwrap()
        .into_iter()
        .find(|i| i.name == "Masala Chai")
        .unwrap();
    kiosk.add_to_cart(&chai).unwrap();
    kiosk.place_order(None).await.unwrap();

    let err = kiosk.login_admin(ADMIN, PASSWORD).await.unwrap_err();
    assert!(matches!(err, KioskError::Mirror(FrameworkError::ActorClosed)));
    let state = kiosk.state();
    assert_eq!(state.session, Some(riya));
    assert!(matches!(state.view, View::OrderSuccess { .. }));
    assert_eq!(state.notification.unwrap().message, "Could not load orders");
    assert!(kiosk.watch_orders().await.is_some());

    let mut state = kiosk.watch_state();
    let waited = tokio::time::timeout(
        Duration::from_secs(30),
        state.wait_for(|s| s.session.is_none()),
    )
    .await;
    assert!(matches!(waited, Ok(Ok(_))), "countdown was lost");
    drop(waited);
    orders.verify();

    kiosk.close().await;
    drop(kiosk);
    drop(menu);
    menu_handle.await.unwrap();
}

#[tokio::test]
async fn test_login_validation_is_reported() {
    let system = boot(TransitionPolicy::Strict).await;
    let kiosk = system.kiosk.clone();

    let err = kiosk.login_student("Riya", " ").await.unwrap_err();
    assert!(matches!(err, KioskError::Auth(_)));
    assert_eq!(
        kiosk.state().notification.unwrap().message,
        "Name and Student ID are required."
    );
    assert_eq!(kiosk.session(), None);

    let err = kiosk.login_admin("", "x").await.unwrap_err();
    assert_eq!(err.to_string(), "Please enter both email and password.");

    drop(kiosk);
    system.shutdown().await.unwrap();
}

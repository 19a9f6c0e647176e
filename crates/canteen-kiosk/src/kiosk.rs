//! # Kiosk Controller
//!
//! `Kiosk` is what a front-end talks to. It owns the session state, the live mirrors of
//! the `menu` and `orders` collections, and the post-order countdown, and it turns user
//! intents into collection writes.
//!
//! ```text
//! front-end ──call──▶ Kiosk ──request──▶ menu / orders actors
//!     ▲                 │                        │
//!     │            reduce(state)            ChangeEvent
//!     │                 ▼                        ▼
//!     └──watch─── KioskState            Menu / Orders mirrors
//! ```
//!
//! Every failure is reported twice: as the returned `Err`, and as an error
//! [`Notification`] in the state. The state is otherwise left as it was.
//!
//! The handle is cheap to clone; all clones drive the same kiosk.

use crate::auth::{self, AuthProvider};
use crate::checkout::build_order;
use crate::clients::{MenuClient, OrderClient};
use crate::config::KioskConfig;
use crate::countdown::Countdown;
use crate::default_menu::default_menu;
use crate::error::KioskError;
use crate::insights::SalesAnalyst;
use crate::live::{mirror_menu, mirror_orders, MenuMirror, OrdersMirror};
use crate::model::{
    MenuItem, MenuItemCreate, MenuItemId, MenuItemUpdate, Order, OrderId, OrderStatus,
    PaymentMethod, Session,
};
use crate::state::{reduce, KioskAction, KioskState, Notification};
use crate::views::{self, DashboardStats, HistoryFilter, MenuFilter, RevenueBucket};
use chrono::{Local, TimeZone, Utc};
use collection_framework::CollectionClient;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, instrument, warn};

#[derive(Clone)]
pub struct Kiosk {
    inner: Arc<Inner>,
}

struct Inner {
    menu: MenuClient,
    orders: OrderClient,
    auth: Arc<dyn AuthProvider>,
    analyst: Arc<dyn SalesAnalyst>,
    config: KioskConfig,
    store: watch::Sender<KioskState>,
    menu_mirror: MenuMirror,
    /// Exists only while someone is signed in.
    orders_mirror: Mutex<Option<OrdersMirror>>,
    countdown: Mutex<Option<Countdown>>,
    /// Bumped on every sign-in and sign-out. A countdown only signs out the session it
    /// was started in.
    epoch: AtomicU64,
}

impl Kiosk {
    /// Starts following the menu. Orders are followed once someone signs in.
    pub async fn new(
        menu: MenuClient,
        orders: OrderClient,
        auth: Arc<dyn AuthProvider>,
        analyst: Arc<dyn SalesAnalyst>,
        config: KioskConfig,
    ) -> Result<Self, KioskError> {
        let menu_mirror = mirror_menu(menu.inner()).await?;
        let (store, _) = watch::channel(KioskState::default());
        Ok(Self {
            inner: Arc::new(Inner {
                menu,
                orders,
                auth,
                analyst,
                config,
                store,
                menu_mirror,
                orders_mirror: Mutex::new(None),
                countdown: Mutex::new(None),
                epoch: AtomicU64::new(0),
            }),
        })
    }

    // --- State ---

    pub fn state(&self) -> KioskState {
        self.inner.store.borrow().clone()
    }

    pub fn watch_state(&self) -> watch::Receiver<KioskState> {
        self.inner.store.subscribe()
    }

    pub fn session(&self) -> Option<Session> {
        self.inner.store.borrow().session.clone()
    }

    fn dispatch(&self, action: KioskAction) -> Result<(), KioskError> {
        debug!(?action, "Dispatch");
        let mut result = Ok(());
        self.inner.store.send_modify(|state| result = reduce(state, action));
        result.map_err(KioskError::from)
    }

    fn notify(&self, notification: Notification) {
        self.inner
            .store
            .send_modify(|state| state.notification = Some(notification));
    }

    pub fn dismiss_notification(&self) {
        self.inner
            .store
            .send_modify(|state| state.notification = None);
    }

    fn require_session(&self) -> Result<Session, KioskError> {
        self.session().ok_or(KioskError::NotSignedIn)
    }

    fn require_admin(&self) -> Result<Session, KioskError> {
        let session = self.require_session()?;
        if !session.is_admin() {
            warn!(uid = %session.uid, "Admin operation refused");
            return Err(KioskError::Forbidden);
        }
        Ok(session)
    }

    /// Returns `result` unchanged, raising an error notification when it failed.
    fn report<T, E: Into<KioskError>>(
        &self,
        result: Result<T, E>,
        message: impl FnOnce(&KioskError) -> String,
    ) -> Result<T, KioskError> {
        result.map_err(|e| {
            let e = e.into();
            warn!(error = %e, "Kiosk operation failed");
            self.notify(Notification::error(message(&e)));
            e
        })
    }

    // --- Live data ---

    /// The whole menu, sorted by name.
    pub fn menu(&self) -> Arc<Vec<MenuItem>> {
        self.inner.menu_mirror.snapshot()
    }

    pub fn watch_menu(&self) -> watch::Receiver<Arc<Vec<MenuItem>>> {
        self.inner.menu_mirror.watch()
    }

    /// The menu as the current [`MenuFilter`] shows it.
    pub fn visible_menu(&self) -> Vec<MenuItem> {
        let filter = self.inner.store.borrow().menu_filter.clone();
        views::filter_menu(&self.menu(), &filter)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Orders visible to the current session, newest first. Empty when signed out.
    pub async fn orders(&self) -> Arc<Vec<Order>> {
        match &*self.inner.orders_mirror.lock().await {
            Some(mirror) => mirror.snapshot(),
            None => Arc::new(Vec::new()),
        }
    }

    pub async fn watch_orders(&self) -> Option<watch::Receiver<Arc<Vec<Order>>>> {
        self.inner
            .orders_mirror
            .lock()
            .await
            .as_ref()
            .map(OrdersMirror::watch)
    }

    pub async fn active_queue(&self) -> Vec<Order> {
        let orders = self.orders().await;
        views::active_queue(&orders).into_iter().cloned().collect()
    }

    /// Orders matching the current [`HistoryFilter`].
    pub async fn history(&self) -> Vec<Order> {
        let filter = self.inner.store.borrow().history_filter.clone();
        let orders = self.orders().await;
        views::history(&orders, &filter).into_iter().cloned().collect()
    }

    /// Revenue per weekday in the kiosk's local time zone.
    pub async fn revenue_rollup(&self) -> Vec<RevenueBucket> {
        self.revenue_rollup_in(&Local).await
    }

    pub async fn revenue_rollup_in<Tz: TimeZone>(&self, tz: &Tz) -> Vec<RevenueBucket> {
        views::revenue_rollup(&self.orders().await, tz)
    }

    pub async fn dashboard(&self) -> DashboardStats {
        views::dashboard_stats(&self.orders().await, &self.menu())
    }

    fn dish_name(&self, id: &MenuItemId) -> String {
        self.menu()
            .iter()
            .find(|item| &item.id == id)
            .map(|item| item.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    // --- Session ---

    #[instrument(skip(self))]
    pub async fn login_student(&self, name: &str, roll_number: &str) -> Result<Session, KioskError> {
        let result = auth::login_student(
            self.inner.auth.as_ref(),
            name,
            roll_number,
            &self.inner.config.admin_marker,
        )
        .await;
        let session = self.report(result, |e| e.to_string())?;
        self.begin_session(session.clone()).await?;
        Ok(session)
    }

    #[instrument(skip(self, password))]
    pub async fn login_admin(&self, email: &str, password: &str) -> Result<Session, KioskError> {
        let result = auth::login_admin(
            self.inner.auth.as_ref(),
            email,
            password,
            &self.inner.config.admin_marker,
        )
        .await;
        let (session, provisioned) = self.report(result, |e| format!("Login failed: {e}"))?;
        self.begin_session(session.clone()).await?;
        if provisioned {
            self.notify(Notification::success("Admin account created & logged in"));
        }
        Ok(session)
    }

    async fn begin_session(&self, session: Session) -> Result<(), KioskError> {
        // Nothing of the previous session is touched until the new mirror exists.
        let mirror = mirror_orders(self.inner.orders.inner(), &session).await;
        let mirror = self.report(mirror, |_| "Could not load orders".to_string())?;

        self.inner.epoch.fetch_add(1, Ordering::SeqCst);
        self.inner.countdown.lock().await.take();
        // The previous session's mirror, if any, stops when dropped here.
        self.inner.orders_mirror.lock().await.replace(mirror);

        info!(uid = %session.uid, role = ?session.role, "Session started");
        self.dispatch(KioskAction::SignedIn(session))
    }

    /// Ends the session now, abandoning any running countdown.
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        self.inner.countdown.lock().await.take();
        self.end_session().await;
    }

    async fn end_session(&self) {
        self.inner.epoch.fetch_add(1, Ordering::SeqCst);
        if let Err(e) = self.inner.auth.sign_out().await {
            warn!(error = %e, "Provider sign-out failed");
        }
        if let Some(mirror) = self.inner.orders_mirror.lock().await.take() {
            mirror.cancel();
        }
        info!("Session ended");
        // SignedOut cannot fail.
        let _ = self.dispatch(KioskAction::SignedOut);
    }

    // --- Tray & checkout ---

    pub fn add_to_cart(&self, item: &MenuItem) -> Result<(), KioskError> {
        self.dispatch(KioskAction::AddToCart(item.clone()))
    }

    pub fn remove_from_cart(&self, id: &MenuItemId) {
        let _ = self.dispatch(KioskAction::RemoveFromCart(id.clone()));
    }

    pub fn set_menu_filter(&self, filter: MenuFilter) {
        let _ = self.dispatch(KioskAction::SetMenuFilter(filter));
    }

    pub fn set_history_filter(&self, filter: HistoryFilter) {
        let _ = self.dispatch(KioskAction::SetHistoryFilter(filter));
    }

    /// Submits the tray as one order and starts the sign-out countdown.
    ///
    /// On failure the tray is kept and no countdown starts. Returns the order token.
    #[instrument(skip(self))]
    pub async fn place_order(
        &self,
        payment_method: Option<PaymentMethod>,
    ) -> Result<String, KioskError> {
        let session = self.require_session()?;
        let items = self.inner.store.borrow().cart.items().to_vec();
        let params = self.report(
            build_order(&session, &items, payment_method, Utc::now()),
            |e| e.to_string(),
        )?;
        let token = params.token_number.clone();

        self.dispatch(KioskAction::CheckoutStarted)?;
        if let Err(e) = self.inner.orders.place_order(params).await {
            warn!(error = %e, "Order failed");
            self.dispatch(KioskAction::CheckoutFailed(
                "Failed to place order. Try again.".to_string(),
            ))?;
            return Err(e.into());
        }

        let seconds = self.inner.config.logout_seconds;
        self.dispatch(KioskAction::OrderPlaced {
            token: token.clone(),
            seconds,
        })?;
        self.start_countdown(seconds).await;
        info!(%token, seconds, "Order placed, countdown started");
        Ok(token)
    }

    async fn start_countdown(&self, seconds: u32) {
        let countdown = Countdown::start(seconds);
        let mut remaining = countdown.watch();
        let epoch = self.inner.epoch.load(Ordering::SeqCst);
        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        self.inner.countdown.lock().await.replace(countdown);

        tokio::spawn(async move {
            // The starting value counts too, so a zero-second countdown signs out at once.
            loop {
                let left = *remaining.borrow_and_update();
                {
                    let Some(inner) = weak.upgrade() else {
                        return;
                    };
                    if inner.epoch.load(Ordering::SeqCst) != epoch {
                        return;
                    }
                    let kiosk = Kiosk { inner };
                    let _ = kiosk.dispatch(KioskAction::CountdownTick(left));
                    if left == 0 {
                        kiosk.inner.countdown.lock().await.take();
                        kiosk.end_session().await;
                        return;
                    }
                }
                // Err when the countdown is dropped before reaching zero.
                if remaining.changed().await.is_err() {
                    return;
                }
            }
        });
    }

    /// "Done / Next Student": runs the countdown out immediately.
    pub async fn finish_countdown(&self) {
        if let Some(countdown) = &*self.inner.countdown.lock().await {
            countdown.finish_now();
        }
    }

    // --- Administration ---

    #[instrument(skip(self))]
    pub async fn update_order_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<(), KioskError> {
        self.require_admin()?;
        let change = self.report(self.inner.orders.update_status(id, status).await, |_| {
            "Failed to update status".to_string()
        })?;
        debug!(from = %change.from, to = %change.to, "Status changed");
        self.notify(Notification::info(format!(
            "Order status updated to {status}"
        )));
        Ok(())
    }

    /// Flips a dish between available and sold out. Returns the new availability.
    #[instrument(skip(self))]
    pub async fn toggle_availability(&self, id: MenuItemId) -> Result<bool, KioskError> {
        self.require_admin()?;
        let name = self.dish_name(&id);
        let available = self.report(self.inner.menu.toggle_availability(id).await, |_| {
            "Failed to update item availability".to_string()
        })?;
        let label = if available { "Available" } else { "Sold Out" };
        self.notify(Notification::info(format!("{name} is now {label}")));
        Ok(available)
    }

    #[instrument(skip(self))]
    pub async fn add_menu_item(&self, params: MenuItemCreate) -> Result<MenuItemId, KioskError> {
        self.require_admin()?;
        let id = self.report(self.inner.menu.add_item(params).await, |_| {
            "Failed to save item".to_string()
        })?;
        self.notify(Notification::success("New dish added to inventory"));
        Ok(id)
    }

    #[instrument(skip(self))]
    pub async fn edit_menu_item(
        &self,
        id: MenuItemId,
        update: MenuItemUpdate,
    ) -> Result<MenuItem, KioskError> {
        self.require_admin()?;
        let item = self.report(self.inner.menu.edit_item(id, update).await, |_| {
            "Failed to save item".to_string()
        })?;
        self.notify(Notification::success("Item updated successfully"));
        Ok(item)
    }

    #[instrument(skip(self))]
    pub async fn delete_menu_item(&self, id: MenuItemId) -> Result<(), KioskError> {
        self.require_admin()?;
        let name = self.dish_name(&id);
        self.report(self.inner.menu.delete(id).await, |_| {
            "Failed to delete item.".to_string()
        })?;
        self.notify(Notification::success(format!("{name} deleted")));
        Ok(())
    }

    /// Replaces the menu with the default catalogue in one atomic write.
    #[instrument(skip(self))]
    pub async fn reset_menu(&self) -> Result<usize, KioskError> {
        self.require_admin()?;
        self.notify(Notification::info("Initializing database..."));
        let count = self.report(self.inner.menu.reset_menu(default_menu()).await, |_| {
            "Failed to update menu database.".to_string()
        })?;
        self.notify(Notification::success("Inventory initialized successfully!"));
        Ok(count)
    }

    pub fn show_dashboard(&self) -> Result<(), KioskError> {
        self.require_admin()?;
        self.dispatch(KioskAction::ShowDashboard)
    }

    pub fn show_history(&self) -> Result<(), KioskError> {
        self.require_admin()?;
        self.dispatch(KioskAction::ShowHistory)
    }

    /// Asks the analyst about the current rollup and keeps the answer in the state.
    #[instrument(skip(self))]
    pub async fn analyze_sales(&self) -> Result<String, KioskError> {
        self.require_admin()?;
        let rollup = self.revenue_rollup().await;
        let text = self.inner.analyst.analyze(&rollup).await;
        self.dispatch(KioskAction::AnalysisReady(text.clone()))?;
        Ok(text)
    }

    /// Stops the mirrors and the countdown. The collections themselves keep running.
    pub async fn close(&self) {
        self.inner.epoch.fetch_add(1, Ordering::SeqCst);
        self.inner.countdown.lock().await.take();
        if let Some(mirror) = self.inner.orders_mirror.lock().await.take() {
            mirror.cancel();
        }
        self.inner.menu_mirror.cancel();
        info!("Kiosk closed");
    }
}

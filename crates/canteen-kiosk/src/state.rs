//! Session and screen state of one kiosk.
//!
//! [`KioskState`] is changed only by [`reduce`]. The kiosk controller keeps it behind a
//! `watch` channel, so front-ends observe every change without polling.
use crate::model::{Cart, CartError, MenuItem, MenuItemId, Session};
use crate::views::{HistoryFilter, MenuFilter};

/// Which screen the kiosk is on.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum View {
    #[default]
    Login,
    Menu,
    AdminDashboard,
    AdminHistory,
    /// Order confirmation, counting down to the automatic sign-out.
    OrderSuccess { token: String, seconds_left: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

/// The toast shown to the user. A new one replaces the previous one.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Info,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct KioskState {
    pub session: Option<Session>,
    pub cart: Cart,
    pub view: View,
    pub menu_filter: MenuFilter,
    pub history_filter: HistoryFilter,
    pub notification: Option<Notification>,
    /// An order is being submitted.
    pub processing: bool,
    /// Latest sales commentary.
    pub analysis: Option<String>,
}

#[derive(Debug, Clone)]
pub enum KioskAction {
    SignedIn(Session),
    SignedOut,
    AddToCart(MenuItem),
    RemoveFromCart(MenuItemId),
    CheckoutStarted,
    OrderPlaced { token: String, seconds: u32 },
    CheckoutFailed(String),
    CountdownTick(u32),
    ShowDashboard,
    ShowHistory,
    SetMenuFilter(MenuFilter),
    SetHistoryFilter(HistoryFilter),
    AnalysisReady(String),
    Notify(Notification),
    DismissNotification,
}

/// Applies `action` to `state`.
///
/// The only failure is adding a sold-out dish; the state then carries an error
/// notification and the cart is unchanged.
pub fn reduce(state: &mut KioskState, action: KioskAction) -> Result<(), CartError> {
    match action {
        KioskAction::SignedIn(session) => {
            state.view = if session.is_admin() {
                View::AdminDashboard
            } else {
                View::Menu
            };
            state.notification = Some(Notification::success(if session.is_admin() {
                "Welcome, Admin!".to_string()
            } else {
                format!("Welcome, {}!", session.display_name)
            }));
            state.cart.clear();
            state.session = Some(session);
        }
        KioskAction::SignedOut => {
            *state = KioskState {
                notification: Some(Notification::info("Ready for next student")),
                ..KioskState::default()
            };
        }
        KioskAction::AddToCart(item) => match state.cart.add(&item) {
            Ok(1) => {
                state.notification = Some(Notification::success(format!(
                    "{} added to tray",
                    item.name
                )));
            }
            Ok(_) => {
                state.notification = Some(Notification::success(format!(
                    "Added another {}",
                    item.name
                )));
            }
            Err(e) => {
                state.notification = Some(Notification::error(e.to_string()));
                return Err(e);
            }
        },
        KioskAction::RemoveFromCart(id) => {
            state.cart.remove(&id);
        }
        KioskAction::CheckoutStarted => state.processing = true,
        KioskAction::OrderPlaced { token, seconds } => {
            state.processing = false;
            state.cart.clear();
            state.view = View::OrderSuccess {
                token,
                seconds_left: seconds,
            };
        }
        KioskAction::CheckoutFailed(message) => {
            state.processing = false;
            state.notification = Some(Notification::error(message));
        }
        KioskAction::CountdownTick(left) => {
            if let View::OrderSuccess { seconds_left, .. } = &mut state.view {
                *seconds_left = left;
            }
        }
        KioskAction::ShowDashboard => state.view = View::AdminDashboard,
        KioskAction::ShowHistory => state.view = View::AdminHistory,
        KioskAction::SetMenuFilter(filter) => state.menu_filter = filter,
        KioskAction::SetHistoryFilter(filter) => state.history_filter = filter,
        KioskAction::AnalysisReady(text) => state.analysis = Some(text),
        KioskAction::Notify(notification) => state.notification = Some(notification),
        KioskAction::DismissNotification => state.notification = None,
    }
    Ok(())
}

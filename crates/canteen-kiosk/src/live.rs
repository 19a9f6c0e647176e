//! Live read models of the `menu` and `orders` collections.
//!
//! Both are [`LiveMirror`]s: they start from the collection's snapshot and then follow its
//! change feed, so the kiosk never polls.
use crate::model::{MenuItem, Order, Session};
use collection_framework::{FrameworkError, LiveMirror, Projection, ResourceClient};

pub type MenuMirror = LiveMirror<MenuItem>;
pub type OrdersMirror = LiveMirror<Order>;

/// Whole menu, by name (case-insensitive, ties broken by the exact name).
pub fn menu_projection() -> Projection<MenuItem> {
    Projection::all().sort_by(|a: &MenuItem, b: &MenuItem| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    })
}

/// Orders visible to `session`, newest first. Administrators see every order, students
/// only their own.
pub fn orders_projection(session: &Session) -> Projection<Order> {
    let newest_first = |a: &Order, b: &Order| b.timestamp.cmp(&a.timestamp);
    if session.is_admin() {
        return Projection::all().sort_by(newest_first);
    }
    let uid = session.uid.clone();
    Projection::all()
        .filter(move |o: &Order| o.student_id == uid)
        .sort_by(newest_first)
}

pub async fn mirror_menu(client: &ResourceClient<MenuItem>) -> Result<MenuMirror, FrameworkError> {
    LiveMirror::spawn(client, menu_projection()).await
}

pub async fn mirror_orders(
    client: &ResourceClient<Order>,
    session: &Session,
) -> Result<OrdersMirror, FrameworkError> {
    LiveMirror::spawn(client, orders_projection(session)).await
}

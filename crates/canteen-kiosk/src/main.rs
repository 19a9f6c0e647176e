//! # Canteen Kiosk
//!
//! Scripted run of one kiosk: an administrator loads the default menu, a student orders,
//! the kitchen works the order through to completion, and the day's sales are analysed.
//!
//! ```bash
//! RUST_LOG=info cargo run -p canteen-kiosk
//! ```

use canteen_kiosk::config::KioskConfig;
use canteen_kiosk::model::PaymentMethod;
use canteen_kiosk::{KioskError, KioskSystem};
use collection_framework::tracing::setup_tracing;
use tracing::{info, Instrument};

#[tokio::main]
async fn main() -> Result<(), KioskError> {
    dotenvy::dotenv().ok();
    setup_tracing();

    let config = KioskConfig::load()?;
    info!(
        policy = %config.status_policy,
        logout_seconds = config.logout_seconds,
        "Starting canteen kiosk"
    );
    let system = KioskSystem::new(config).await?;
    let kiosk = system.kiosk.clone();

    let span = tracing::info_span!("menu_setup");
    async {
        kiosk.login_admin("admin@canteen.in", "canteen123").await?;
        let count = kiosk.reset_menu().await?;
        info!(count, "Menu loaded");
        kiosk.logout().await;
        Ok::<_, KioskError>(())
    }
    .instrument(span)
    .await?;

    // The mirror catches up asynchronously.
    let mut menu = kiosk.watch_menu();
    let _ = menu.wait_for(|items| !items.is_empty()).await;

    let span = tracing::info_span!("student_order");
    let token = async {
        kiosk.login_student("Riya Sharma", "21CS042").await?;
        for name in ["Veg Biryani", "Veg Biryani", "Veg Cutlet (2 pcs)"] {
            if let Some(item) = kiosk.menu().iter().find(|i| i.name == name) {
                kiosk.add_to_cart(item)?;
            }
        }
        let total = kiosk.state().cart.total();
        info!(total, "Tray ready");
        let token = kiosk.place_order(Some(PaymentMethod::Upi)).await?;
        kiosk.finish_countdown().await;
        Ok::<_, KioskError>(token)
    }
    .instrument(span)
    .await?;
    info!(%token, "Order placed");

    let mut state = kiosk.watch_state();
    let _ = state.wait_for(|s| s.session.is_none()).await;

    let span = tracing::info_span!("kitchen");
    async {
        kiosk.login_admin("admin@canteen.in", "canteen123").await?;
        if let Some(mut orders) = kiosk.watch_orders().await {
            let _ = orders.wait_for(|o| !o.is_empty()).await;
        }
        for order in kiosk.active_queue().await {
            let mut status = order.status;
            while let Some(next) = status.next() {
                kiosk.update_order_status(order.id.clone(), next).await?;
                status = next;
            }
            info!(token = %order.token_number, %status, "Order fulfilled");
        }

        for bucket in kiosk.revenue_rollup().await {
            info!(day = %bucket.name, revenue = bucket.revenue, orders = bucket.orders, "Sales");
        }
        let analysis = kiosk.analyze_sales().await?;
        info!(%analysis, "Sales analysis");
        kiosk.logout().await;
        Ok::<_, KioskError>(())
    }
    .instrument(span)
    .await?;

    drop(kiosk);
    system.shutdown().await?;

    info!("Kiosk run completed");
    Ok(())
}

//! Data bridge: forwards snapshot-store changes to the app loop.
//!
//! Runs as a background task. Probes the API, performs the initial reload,
//! pushes the resulting snapshots, then relays every replacement and API
//! status transition as an [`Action`] until cancelled.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use hoteldesk_core::Controller;

use crate::action::{Action, Notification};

pub async fn spawn_data_bridge(
    controller: Controller,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    let mut rooms = controller.rooms();
    let mut guests = controller.guests();
    let mut bookings = controller.bookings();
    let mut api_status = controller.api_status();

    let status = controller.ping().await;
    info!(%status, "API probe finished");
    let _ = action_tx.send(Action::ApiStatusChanged(status));

    let report = controller.reload().await;
    for notice in report.notices() {
        let _ = action_tx.send(Action::Notify(Notification::warning(notice)));
    }

    // The reload may have replaced collections before the loop starts
    // listening, so push what is current now.
    let _ = action_tx.send(Action::RoomsUpdated(rooms.latest()));
    let _ = action_tx.send(Action::GuestsUpdated(guests.latest()));
    let _ = action_tx.send(Action::BookingsUpdated(bookings.latest()));

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            Some(r) = rooms.changed() => {
                debug!(count = r.len(), "dispatching RoomsUpdated");
                let _ = action_tx.send(Action::RoomsUpdated(r));
            }
            Some(g) = guests.changed() => {
                let _ = action_tx.send(Action::GuestsUpdated(g));
            }
            Some(b) = bookings.changed() => {
                let _ = action_tx.send(Action::BookingsUpdated(b));
            }
            Ok(()) = api_status.changed() => {
                let status = *api_status.borrow_and_update();
                let _ = action_tx.send(Action::ApiStatusChanged(status));
            }
        }
    }

    debug!("data bridge shut down");
}

// Author: Dustin Pilgrim
// License: MIT

use std::sync::Arc;

use tokio::sync::mpsc::Sender;
use tokio::time::{Duration, MissedTickBehavior, interval};

use crate::auth::AuthProvider;
use crate::core::events::{Event, ValidityOutcome};
use crate::core::manager_msg::ManagerMsg;
use crate::core::utils::Clock;

/// Poll the backend for server-side revocation every `period`.
///
/// Results are tagged with `generation`, the session the poller was started
/// for. The first check happens one full period after start. Runs until the
/// receiver goes away or the owning task is aborted.
pub async fn run_validity_poller(
    auth: Arc<dyn AuthProvider>,
    tx: Sender<ManagerMsg>,
    clock: Clock,
    period: Duration,
    generation: u64,
) {
    tracing::debug!("validity poller started (every {:?})", period);

    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker.tick().await;

    loop {
        ticker.tick().await;

        let outcome = match auth.is_session_valid().await {
            Ok(true) => ValidityOutcome::Valid,
            Ok(false) => ValidityOutcome::Invalid,
            Err(e) => ValidityOutcome::CheckFailed {
                message: e.to_string(),
            },
        };

        let ev = Event::ValidityChecked {
            outcome,
            generation,
            now_ms: clock.now_ms(),
        };

        if tx.send(ManagerMsg::Event(ev)).await.is_err() {
            tracing::debug!("validity poller stopping (receiver dropped)");
            break;
        }
    }
}

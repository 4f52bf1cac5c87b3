use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::AbortHandle;
use tracing::{debug, info, warn};

use super::callback::parse_callback;
use crate::client::{ApiClient, ApiError};
use crate::config::PaymentConfig;
use crate::events::{AppEvent, EventBus};

/// One in-flight checkout attempt. Created when the checkout link is
/// requested, dropped once a terminal outcome is reached. At most one
/// exists at a time; a new attempt supersedes any prior one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingPayment {
    pub membership_id: i64,
    pub payment_id: i64,
    pub checkout_url: String,
    pub created_at: DateTime<Utc>,
}

/// Where a checkout attempt currently stands. `ManualFallback` is the
/// sub-state entered when no redirect callback arrived in time: the user is
/// offered an explicit server-side verification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PaymentPhase {
    Idle,
    LinkRequested,
    AwaitingCompletion,
    ManualFallback,
    Completed { payment_id: i64 },
    Failed { message: String },
    Cancelled,
}

impl PaymentPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PaymentPhase::Completed { .. } | PaymentPhase::Failed { .. } | PaymentPhase::Cancelled
        )
    }
}

struct Inner {
    pending: Option<PendingPayment>,
    timer: Option<AbortHandle>,
    /// Bumped on every new checkout so stale timers and superseded attempts
    /// recognize themselves and stand down.
    attempt: u64,
}

struct Shared {
    phase: watch::Sender<PaymentPhase>,
    inner: Mutex<Inner>,
}

/// Drives the subscribe → external-checkout → completion-detection state
/// machine. The external browser session is the caller's job (it opens
/// `PendingPayment::checkout_url`); the reconciler handles everything
/// around it: the redirect callback, the cancellable fallback timer, the
/// manual verification poll, and the one-to-many completion broadcast.
pub struct PaymentReconciler {
    api: Arc<ApiClient>,
    events: EventBus,
    callback_scheme: String,
    fallback_after: Duration,
    shared: Arc<Shared>,
}

impl PaymentReconciler {
    pub fn new(api: Arc<ApiClient>, events: EventBus, config: &PaymentConfig) -> Self {
        let (phase, _) = watch::channel(PaymentPhase::Idle);
        PaymentReconciler {
            api,
            events,
            callback_scheme: config.callback_scheme.clone(),
            fallback_after: Duration::from_secs(config.fallback_after_secs),
            shared: Arc::new(Shared {
                phase,
                inner: Mutex::new(Inner {
                    pending: None,
                    timer: None,
                    attempt: 0,
                }),
            }),
        }
    }

    pub fn phase(&self) -> PaymentPhase {
        self.shared.phase.borrow().clone()
    }

    /// Observe phase transitions (the payment screen renders off this).
    pub fn subscribe_phase(&self) -> watch::Receiver<PaymentPhase> {
        self.shared.phase.subscribe()
    }

    pub fn pending_payment(&self) -> Option<PendingPayment> {
        self.shared
            .inner
            .lock()
            .expect("payment state mutex poisoned")
            .pending
            .clone()
    }

    /// Starts a checkout: subscribes to the plan, requests the hosted
    /// checkout link, records the pending payment, and arms the fallback
    /// timer. Returns the pending payment so the caller can open its
    /// `checkout_url` in an external browser session. Any prior attempt
    /// still awaiting completion is superseded.
    pub async fn begin_checkout(&self, plan_id: i64) -> Result<PendingPayment, ApiError> {
        let attempt = {
            let mut inner = self.shared.inner.lock().expect("payment state mutex poisoned");
            if let Some(timer) = inner.timer.take() {
                timer.abort();
            }
            if inner.pending.take().is_some() {
                debug!("Superseding prior pending payment with a new checkout.");
            }
            inner.attempt += 1;
            inner.attempt
        };
        self.shared.phase.send_replace(PaymentPhase::LinkRequested);

        let membership_id = match self.api.subscribe(plan_id).await {
            Ok(id) => id,
            Err(e) => {
                self.fail_attempt(attempt, e.to_string());
                return Err(e);
            }
        };
        let link = match self.api.create_checkout_link(membership_id).await {
            Ok(link) => link,
            Err(e) => {
                self.fail_attempt(attempt, e.to_string());
                return Err(e);
            }
        };
        let Some(payment_id) = link.payment_id else {
            let e = ApiError::Decoding("checkout link response carried no payment id".to_string());
            self.fail_attempt(attempt, e.to_string());
            return Err(e);
        };

        let pending = PendingPayment {
            membership_id,
            payment_id,
            checkout_url: link.checkout_url,
            created_at: Utc::now(),
        };
        {
            let mut inner = self.shared.inner.lock().expect("payment state mutex poisoned");
            // A newer checkout may have superseded this one while the
            // network calls were in flight; it owns the state now.
            if inner.attempt == attempt {
                inner.pending = Some(pending.clone());
                // Phase flips before the timer is armed so the timer can
                // never observe a stale LinkRequested phase.
                self.shared.phase.send_replace(PaymentPhase::AwaitingCompletion);
                let timer = tokio::spawn(Self::fallback_timer(
                    self.shared.clone(),
                    self.fallback_after,
                    attempt,
                ));
                inner.timer = Some(timer.abort_handle());
                info!(
                    "Awaiting external checkout completion for payment {}.",
                    payment_id
                );
            }
        }
        Ok(pending)
    }

    /// Terminal failure for one checkout attempt. A superseding checkout
    /// owns the state once the counter has moved on; a stale failure must
    /// leave it untouched.
    fn fail_attempt(&self, attempt: u64, message: String) {
        {
            let mut inner = self.shared.inner.lock().expect("payment state mutex poisoned");
            if inner.attempt != attempt {
                debug!("Dropping failure of a superseded checkout attempt.");
                return;
            }
            if let Some(timer) = inner.timer.take() {
                timer.abort();
            }
            inner.pending = None;
        }
        warn!("Checkout failed: {}", message);
        self.shared.phase.send_replace(PaymentPhase::Failed { message });
    }

    /// Consumes the custom-scheme redirect from the hosted checkout.
    /// A matching payment id with status "success" completes the attempt
    /// and broadcasts `PaymentCompleted` exactly once; a mismatched id or
    /// any other status fails it. Callbacks arriving with nothing pending
    /// (already completed, cancelled, or superseded) are dropped.
    pub fn handle_callback(&self, callback_url: &str) {
        enum Outcome {
            Complete(i64),
            Fail(String),
        }

        let outcome = {
            let mut inner = self.shared.inner.lock().expect("payment state mutex poisoned");
            let Some(expected_id) = inner.pending.as_ref().map(|p| p.payment_id) else {
                warn!("Payment callback received with no pending payment; dropping it.");
                return;
            };
            let outcome = match parse_callback(callback_url, &self.callback_scheme) {
                Ok(params) if params.payment_id == expected_id && params.status == "success" => {
                    Outcome::Complete(expected_id)
                }
                Ok(params) if params.payment_id != expected_id => Outcome::Fail(format!(
                    "Payment callback referenced unknown payment {}",
                    params.payment_id
                )),
                Ok(params) => {
                    Outcome::Fail(format!("Payment ended with status '{}'", params.status))
                }
                Err(e) => Outcome::Fail(format!("Malformed payment callback: {}", e)),
            };
            if let Some(timer) = inner.timer.take() {
                timer.abort();
            }
            inner.pending = None;
            outcome
        };

        match outcome {
            Outcome::Complete(payment_id) => {
                info!("Payment {} completed via redirect callback.", payment_id);
                self.shared
                    .phase
                    .send_replace(PaymentPhase::Completed { payment_id });
                self.events.publish(AppEvent::PaymentCompleted { payment_id });
            }
            Outcome::Fail(message) => {
                warn!("{}", message);
                self.shared
                    .phase
                    .send_replace(PaymentPhase::Failed { message });
            }
        }
    }

    /// The user dismissed the external browser session without a callback.
    /// A distinct terminal outcome with its own message, not an error.
    pub fn checkout_dismissed(&self) {
        {
            let mut inner = self.shared.inner.lock().expect("payment state mutex poisoned");
            if inner.pending.take().is_none() {
                return;
            }
            if let Some(timer) = inner.timer.take() {
                timer.abort();
            }
        }
        info!("Checkout dismissed before any callback; payment cancelled.");
        self.shared.phase.send_replace(PaymentPhase::Cancelled);
    }

    /// Explicit server-side verification from the manual fallback. Returns
    /// `Ok(true)` when the payment is confirmed (completing the attempt and
    /// broadcasting), `Ok(false)` when it is not confirmed yet (the attempt
    /// stays in fallback so the user can retry). Errors propagate without a
    /// transition.
    pub async fn verify_manually(&self) -> Result<bool, ApiError> {
        let payment_id = {
            let inner = self.shared.inner.lock().expect("payment state mutex poisoned");
            inner.pending.as_ref().map(|p| p.payment_id)
        };
        let Some(payment_id) = payment_id else {
            warn!("Manual verification requested with no pending payment.");
            return Ok(false);
        };

        let status = self.api.check_payment_status(payment_id).await?;
        if status != "success" {
            debug!(
                "Payment {} not confirmed yet (status '{}').",
                payment_id, status
            );
            return Ok(false);
        }

        // The redirect callback may have won the race while we were
        // polling; only the path that takes the pending payment broadcasts.
        let won = {
            let mut inner = self.shared.inner.lock().expect("payment state mutex poisoned");
            if inner.pending.as_ref().map(|p| p.payment_id) == Some(payment_id) {
                if let Some(timer) = inner.timer.take() {
                    timer.abort();
                }
                inner.pending = None;
                true
            } else {
                false
            }
        };
        if won {
            info!("Payment {} confirmed via manual verification.", payment_id);
            self.shared
                .phase
                .send_replace(PaymentPhase::Completed { payment_id });
            self.events.publish(AppEvent::PaymentCompleted { payment_id });
        }
        Ok(true)
    }

    async fn fallback_timer(shared: Arc<Shared>, after: Duration, attempt: u64) {
        tokio::time::sleep(after).await;
        let inner = shared.inner.lock().expect("payment state mutex poisoned");
        if inner.attempt != attempt || inner.pending.is_none() {
            return;
        }
        if matches!(&*shared.phase.borrow(), PaymentPhase::AwaitingCompletion) {
            info!(
                "No payment callback within {:?}; offering manual verification.",
                after
            );
            shared.phase.send_replace(PaymentPhase::ManualFallback);
        }
    }
}

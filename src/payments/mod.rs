pub mod callback;
pub mod reconciler;

pub use callback::{parse_callback, CallbackParams};
pub use reconciler::{PaymentPhase, PaymentReconciler, PendingPayment};

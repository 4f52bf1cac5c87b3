pub mod auth;
pub mod membership;
pub mod payment;
pub mod plan;
pub mod profile;

pub use auth::AuthResponse;
pub use membership::{
    CurrentMembershipResponse, DashboardResponse, Membership, MembershipEnvelope, MembershipStatus,
};
pub use payment::{CheckoutLink, CreatePaymentResponse, PaymentRecord, PaymentStatusResponse};
pub use plan::{Plan, PlansResponse};
pub use profile::UserProfile;

pub mod answer;
pub mod checkout;
#[cfg(feature = "serde")]
pub mod dto;
pub mod metrics;
pub mod plan;
pub mod profile;
pub mod question;

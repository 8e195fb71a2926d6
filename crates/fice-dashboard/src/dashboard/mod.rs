//! Dashboard orchestration: initial layout resolution, mutations, and
//! re-derivation on role change.

pub mod controller;

pub use controller::DashboardController;

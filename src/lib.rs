//! Backend for a commitment-contract habit app: a user pledges to be at
//! a destination by a deadline under a monetary penalty. This crate
//! evaluates GPS proximity to the destination, enforces deadlines, and
//! charges the penalty through the payment processor when a pact is
//! broken.

pub mod background_processing;
pub mod db;
pub mod entity;
pub mod ingest;
pub mod model;
pub mod payment;
pub mod utils;

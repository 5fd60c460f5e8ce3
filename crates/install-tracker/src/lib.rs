//! # Install Tracker
//!
//! Installation orders, the crews assigned to them, and the consistency between the two.
//!
//! An order lists its deliverers and installers; every assigned user lists the orders it
//! works on. The order side is authoritative. [`clients::OrderClient`] drives every change of
//! an order through [`membership::MembershipIndex`], which keeps the users' side in step, and
//! through a [`files::FileStore`] for the order's documents.
//!
//! Both record types live in [`store_actor`] stores; [`lifecycle::TrackerSystem`] starts and
//! stops them.

pub mod access;
pub mod clients;
pub mod config;
pub mod files;
pub mod lifecycle;
pub mod membership;
pub mod model;
pub mod order_actor;
pub mod user_actor;

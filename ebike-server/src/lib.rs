//! Nearby e-bike station finder.
//!
//! A web application that answers: "which docks near me have an
//! electric bike right now?"

pub mod domain;
pub mod gbfs;
pub mod location;
pub mod nearby;
pub mod presenter;
pub mod scheduler;
pub mod session;
pub mod web;

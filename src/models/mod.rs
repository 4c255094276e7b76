//! Database models shared across the lead capture repository.

pub mod campaign;
pub mod config;
pub mod contact;
pub mod job;
pub mod lead;
pub mod lead_capture;
pub mod lead_capture_log;
pub mod opt_in;
pub mod zmq;

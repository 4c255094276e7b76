//! Domain aggregates exposed by the lead capture service layer.

pub mod campaign;
pub mod contact;
pub mod field;
pub mod job;
pub mod lead;
pub mod lead_capture;
pub mod lead_capture_log;
pub mod opt_in;
pub mod payload;
pub mod types;

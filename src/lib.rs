#![doc(test(attr(deny(warnings))))]

//! Reimburse Core tracks advances made on behalf of others, income received
//! back, and the settlements that allocate one against the other.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod money;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Reimburse Core tracing initialized.");
    });
}

//! Sale records, their owner/contract indexes, listing via approval, and views.

mod index;
mod listing;
mod manage;
mod types;
mod views;

pub use types::*;

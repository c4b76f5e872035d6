//! Bids against listed sales: escrow, bounded history, and two-phase acceptance.

mod bid;
mod escrow;
mod settle;

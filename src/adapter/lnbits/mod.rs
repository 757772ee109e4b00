//! LNbits payment backend adapter.

mod client;
mod dto;

pub use client::LnbitsClient;
pub use dto::{PayLink, RateResponse, WalletDetails};

//! Cart commands and the reducer that applies them to [`CartState`](crate::domain::CartState).

mod commands;
mod reducer;

pub use commands::*;

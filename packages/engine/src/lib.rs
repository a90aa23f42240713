pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use error::GameError;
pub use models::*;
pub use utils::clock::{Clock, ManualClock, SystemClock};

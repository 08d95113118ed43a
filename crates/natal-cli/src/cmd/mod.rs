pub mod calc;
pub mod config;
pub mod limits;
pub mod onboard;
pub mod sign;

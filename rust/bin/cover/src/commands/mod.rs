pub mod calc;
pub mod quote;

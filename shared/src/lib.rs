pub mod error;
pub mod models;
pub mod validation;
pub mod tally;

pub use error::{ErrorCode, ErrorResponse};
pub use models::*;
pub use validation::*;
pub use tally::{rank, is_ranked, RoundTally, TallyError};

#[cfg(test)]
mod tests;

mod board;
mod configuration;

pub use board::{BoardError, BoardParts, BoardUsecases};
pub use configuration::{ConfigurationUsecases, SubmitError};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// All errors generated in `carry-statistic`.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize, Error)]
pub enum StatisticError {
    #[error("insufficient data: {actual} returns provided, at least {required} required")]
    InsufficientData { required: usize, actual: usize },
}

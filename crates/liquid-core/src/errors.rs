use crate::state::LifecycleState;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LiquidError {
    #[error("Failed to read config: {0}")]
    ConfigRead(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    ConfigParse(#[from] serde_json::Error),
    #[error("Cell {index} is not selectable while {state:?}")]
    CellNotSelectable { index: usize, state: LifecycleState },
}

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("no calendar date for year {year}, month {month}")]
    InvalidDate { year: i32, month: u32 },
}

pub type Result<T> = std::result::Result<T, ModelError>;

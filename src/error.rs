use thiserror::Error;

pub type CalcResult<T> = Result<T, CalcError>;

#[derive(Debug, Error)]
pub enum CalcError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("unknown color axis: {name}")]
    UnknownColorAxis { name: String },
}

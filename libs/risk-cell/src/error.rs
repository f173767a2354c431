use thiserror::Error;

#[derive(Error, Debug)]
pub enum PredictionError {
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Invalid booking attributes: {0}")]
    InvalidAttributes(String),

    #[error("Prediction failed: {0}")]
    PredictionFailed(String),
}

pub mod error;
pub mod models;
pub mod services;

pub use error::PredictionError;
pub use models::{BookingAttributes, RiskAssessment, RiskFactor, RiskLevel, MAX_TOP_FACTORS};
pub use services::{HeuristicPredictor, NoShowPredictor};

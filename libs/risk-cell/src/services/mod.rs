pub mod predictor;

pub use predictor::{HeuristicPredictor, NoShowPredictor};

pub mod error;
pub mod models;
pub mod services;

pub use error::OptimizationError;
pub use models::{
    Booking, Change, DayScanOptions, OptimizationRecord, OptimizationRequest, OptimizationResult,
    OptimizationStrategy, OptimizerConfig, ProviderCalendar, ProviderSchedule,
    ReschedulePreferences, RescheduleSuggestion, ScheduleRecommendation, TimeSlot,
};
pub use services::{
    DailyOptimizationService, RescheduleAdvisor, ScheduleOptimizer, ScheduleStore, SlotBuilder,
};

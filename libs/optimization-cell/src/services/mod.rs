pub mod capacity;
pub mod impact;
pub mod optimizer;
pub mod recommendations;
pub mod reschedule;
pub mod service;
pub mod slots;
pub mod store;

pub use capacity::{CapacityPlanner, DEFAULT_NO_SHOW_PROBABILITY};
pub use impact::{ImpactCalculator, OVERBOOK_REASON};
pub use optimizer::ScheduleOptimizer;
pub use reschedule::RescheduleAdvisor;
pub use service::DailyOptimizationService;
pub use slots::{CalendarFault, SlotBuildOutcome, SlotBuilder};
pub use store::ScheduleStore;

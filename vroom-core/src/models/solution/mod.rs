//! Solution models: routes, schedules and reporting summaries.

mod route;
pub use self::route::Route;
pub use self::route::Solution;

mod schedule;
pub use self::schedule::simulate;
pub use self::schedule::RouteSchedule;
pub(crate) use self::schedule::start_load as schedule_start_load;

mod summary;
pub use self::summary::RouteSummary;
pub use self::summary::SolutionSummary;
pub use self::summary::StepSummary;
pub use self::summary::StepType;
pub use self::summary::UnassignedSummary;

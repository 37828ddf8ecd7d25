/// First-year energy aggregation over representative days.
pub mod annual;
/// Hour-by-hour balance of one representative day.
pub mod balance;
pub mod engine;
/// NPV and IRR.
pub mod finance;
pub mod kpi;
/// Regional consumption and generation tables.
pub mod profiles;
pub mod projection;
pub mod types;

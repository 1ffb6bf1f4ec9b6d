pub mod charts;
pub mod dashboard;
pub mod metrics;
pub mod panels;
pub mod table;

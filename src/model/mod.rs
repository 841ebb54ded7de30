pub mod commands;
pub mod position;
pub mod proximity;
pub mod task;
pub mod tracking_info;
pub mod types;

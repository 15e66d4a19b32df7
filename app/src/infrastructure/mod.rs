pub mod command;
pub mod exposition;
pub mod http;
pub mod telemetry;

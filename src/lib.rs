pub mod checker;
pub mod logging;
pub mod metrics;
pub mod monitor;
pub mod network;
pub mod options;
pub mod report;
pub mod resolver;
pub mod utils;

pub mod config;
pub mod edge;
pub mod error;
pub mod metrics;
pub mod model;
pub mod policy;
pub mod queue;
pub mod sim;
pub mod workload;

#[cfg(test)]
mod test;

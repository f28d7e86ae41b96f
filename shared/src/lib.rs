pub mod aws;
pub mod http;
pub mod metrics_defs;
pub mod object_store;
pub mod queue;
pub mod secrets;

//! Common vocabulary for metric definitions.
//!
//! Each service crate keeps a `metrics_defs` module listing the metrics
//! it emits, so the full catalog can be read in one place.

#[derive(Debug, Clone, Copy)]
pub struct MetricDef {
    pub name: &'static str,
    pub description: &'static str,
}

#[macro_export]
macro_rules! counter {
    ($def:expr) => {
        ::metrics::counter!($def.name)
    };
}

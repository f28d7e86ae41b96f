use shared::metrics_defs::MetricDef;

pub const ITEMS_RELAYED: MetricDef = MetricDef {
    name: "worker.items.relayed",
    description: "Items persisted to the object store and deleted from the queue",
};

pub const ITEMS_FAILED: MetricDef = MetricDef {
    name: "worker.items.failed",
    description: "Items left undeleted after a processing failure",
};

pub const EMPTY_POLLS: MetricDef = MetricDef {
    name: "worker.polls.empty",
    description: "Long polls that returned no items",
};

pub const ALL_METRICS: &[MetricDef] = &[ITEMS_RELAYED, ITEMS_FAILED, EMPTY_POLLS];

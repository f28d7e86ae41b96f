use shared::metrics_defs::MetricDef;

pub const SUBMISSIONS_ACCEPTED: MetricDef = MetricDef {
    name: "gateway.submissions.accepted",
    description: "Records that passed validation and were enqueued",
};

pub const SUBMISSIONS_REJECTED: MetricDef = MetricDef {
    name: "gateway.submissions.rejected",
    description: "Submissions rejected or failed before enqueue",
};

pub const ALL_METRICS: &[MetricDef] = &[SUBMISSIONS_ACCEPTED, SUBMISSIONS_REJECTED];

pub(crate) mod pacer;
pub(crate) mod paint;
pub(crate) mod scheduler;

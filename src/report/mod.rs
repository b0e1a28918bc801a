pub(crate) mod sinks;

pub(crate) mod loop_config;

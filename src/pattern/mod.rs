pub(crate) mod console;
pub(crate) mod native;
pub(crate) mod runtime;
pub(crate) mod script;
pub(crate) mod spin;

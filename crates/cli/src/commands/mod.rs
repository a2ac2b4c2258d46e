pub(crate) mod browse;
pub(crate) mod interactive;
pub(crate) mod serve;

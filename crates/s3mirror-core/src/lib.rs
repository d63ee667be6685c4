pub mod config;
pub mod logging;

pub mod layout;
pub mod mirror;
pub mod remote;
pub mod sanitize;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_support;

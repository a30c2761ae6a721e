pub mod apps;
pub mod device;
pub mod locator;
pub mod parse;
pub mod runner;

#[cfg(test)]
pub(crate) mod testing;

pub mod grading;
pub mod matching;
pub mod reconcile;
pub mod service;
pub mod similarity;
pub mod store;

#[cfg(test)]
pub mod memory;

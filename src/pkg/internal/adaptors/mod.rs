pub mod comparisons;
pub mod curriculum;
pub mod transferees;

pub mod adaptors;
pub mod tor;

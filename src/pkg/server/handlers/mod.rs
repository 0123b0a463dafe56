pub mod department;
pub mod probes;
pub mod tor;

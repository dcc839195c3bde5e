pub mod artifacts;
pub mod formatter;
pub mod inference;

pub mod designer;
pub mod directive;
pub mod generator;

pub mod alphabet;
pub mod align;
pub mod batch;
pub mod cli;
pub mod error;
pub mod export;
pub mod reference;
pub mod result;
pub mod sequence;

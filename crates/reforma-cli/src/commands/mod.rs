pub mod classification;
pub mod reference;
pub mod simulation;

pub mod attachment;
pub mod attitude;
pub mod designs;
pub mod environment;
pub mod part;
pub mod propulsion;
pub mod spacecraft;
pub mod structure;

pub mod errors;
pub mod paradigm;

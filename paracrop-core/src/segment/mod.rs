pub mod binarize;
pub mod classify;
pub mod extract;
pub mod order;

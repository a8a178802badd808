pub mod bintree;

pub use bintree::Bintree;

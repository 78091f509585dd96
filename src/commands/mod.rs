pub mod pages;
pub mod split;

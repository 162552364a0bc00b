pub mod intent;
pub mod product;
pub mod result;

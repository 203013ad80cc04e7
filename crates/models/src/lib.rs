pub mod errors;
pub mod db;
pub mod user;
pub mod product;
pub mod product_image;

#[cfg(test)]
mod tests;

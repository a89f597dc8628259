pub mod cart;
pub mod orders;
pub mod products;
pub mod seed;
pub mod user;
pub mod wishlist;

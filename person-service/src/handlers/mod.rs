pub mod health;
pub mod hello;
pub mod personer;

pub use health::healthz;
pub use hello::hello;
pub use personer::{list_personer, save_person};

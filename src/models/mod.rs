pub mod cart;
pub mod order;
pub mod product;
pub mod user;

pub use cart::{Cart, CartLine, CartSnapshot, SnapshotLine};
pub use order::{Order, OrderItem, OrderStatus};
pub use product::Product;
pub use user::User;

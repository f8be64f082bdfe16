pub mod auth_service;
pub mod cart_service;
pub mod checkout;
pub mod discount;

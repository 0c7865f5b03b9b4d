//! Page objects for the storefront under test
//!
//! Each page holds an [`Interactor`](crate::interact::Interactor) by
//! composition; there is no shared base state. Selectors are the concrete
//! glue of this particular storefront and live next to the flows that use
//! them.

pub mod cart;
pub mod checkout;
pub mod login;
pub mod products;

pub use cart::CartPage;
pub use checkout::CheckoutPage;
pub use login::LoginPage;
pub use products::ProductsPage;

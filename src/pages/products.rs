//! Product listing

use crate::error::Result;
use crate::interact::Interactor;

const TITLE: &str = ".title";
const ADD_FIRST_ITEM: &str = "#add-to-cart-sauce-labs-backpack";
const CART_BUTTON: &str = "#shopping_cart_container";

/// The listing shown after a successful login
pub struct ProductsPage {
    ui: Interactor,
}

impl ProductsPage {
    /// Wrap an interactor for this page
    pub fn new(ui: Interactor) -> Self {
        Self { ui }
    }

    /// The listing header text
    pub async fn title_text(&self) -> Result<String> {
        self.ui.read_text(TITLE).await
    }

    /// Whether the listing is on screen (header reads "Products")
    pub async fn is_at(&self) -> Result<bool> {
        Ok(self.title_text().await?.eq_ignore_ascii_case("Products"))
    }

    /// Put the first catalog item into the cart
    pub async fn add_first_item_to_cart(&self) -> Result<()> {
        self.ui.click(ADD_FIRST_ITEM).await
    }

    /// Open the cart view
    pub async fn go_to_cart(&self) -> Result<()> {
        self.ui.click(CART_BUTTON).await
    }
}

//! Shopping cart

use crate::error::Result;
use crate::interact::Interactor;

const ITEM_NAME: &str = "[data-test='inventory-item-name']";
const ITEM_PRICE: &str = "[data-test='inventory-item-price']";
const CHECKOUT_BUTTON: &str = "#checkout";

/// The cart view
pub struct CartPage {
    ui: Interactor,
}

impl CartPage {
    /// Wrap an interactor for this page
    pub fn new(ui: Interactor) -> Self {
        Self { ui }
    }

    /// Displayed name of the cart's line item
    pub async fn item_name(&self) -> Result<String> {
        self.ui.read_text(ITEM_NAME).await
    }

    /// Displayed price with the currency symbol stripped
    pub async fn item_price(&self) -> Result<String> {
        let raw = self.ui.read_text(ITEM_PRICE).await?;
        Ok(raw.trim_start_matches('$').to_string())
    }

    /// Number of line items currently in the cart
    pub async fn item_count(&self) -> Result<usize> {
        self.ui.count(ITEM_NAME).await
    }

    /// Start checkout
    pub async fn checkout(&self) -> Result<()> {
        self.ui.click(CHECKOUT_BUTTON).await
    }
}

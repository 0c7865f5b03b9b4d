//! Checkout form and confirmation

use crate::error::Result;
use crate::interact::Interactor;

const FIRST_NAME: &str = "#first-name";
const LAST_NAME: &str = "#last-name";
const POSTAL_CODE: &str = "#postal-code";
const CONTINUE_BUTTON: &str = "#continue";
const FINISH_BUTTON: &str = "#finish";
const SUCCESS_MESSAGE: &str = "[data-test='complete-header']";

/// The checkout flow: customer info, overview, confirmation
pub struct CheckoutPage {
    ui: Interactor,
}

impl CheckoutPage {
    /// Wrap an interactor for this page
    pub fn new(ui: Interactor) -> Self {
        Self { ui }
    }

    /// Fill customer information and continue to the overview
    pub async fn fill_info(&self, first: &str, last: &str, zip_code: &str) -> Result<()> {
        self.ui.type_text(FIRST_NAME, first).await?;
        self.ui.type_text(LAST_NAME, last).await?;
        self.ui.type_text(POSTAL_CODE, zip_code).await?;
        self.ui.click(CONTINUE_BUTTON).await
    }

    /// Place the order
    pub async fn finish(&self) -> Result<()> {
        self.ui.click(FINISH_BUTTON).await
    }

    /// The confirmation message, highlighted into the visual trail
    pub async fn confirmation_text(&self) -> Result<String> {
        let element = self.ui.emphasize(SUCCESS_MESSAGE).await?;
        let text = element.inner_text().await?.unwrap_or_default();
        Ok(text.trim().to_string())
    }
}

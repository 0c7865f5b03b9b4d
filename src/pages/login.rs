//! Login form

use crate::error::Result;
use crate::interact::Interactor;

const USERNAME: &str = "#user-name";
const PASSWORD: &str = "#password";
const LOGIN_BUTTON: &str = "#login-button";

/// The storefront's login form
pub struct LoginPage {
    ui: Interactor,
}

impl LoginPage {
    /// Wrap an interactor for this page
    pub fn new(ui: Interactor) -> Self {
        Self { ui }
    }

    /// Navigate to the storefront entry point
    pub async fn open(&self, base_url: &str) -> Result<&Self> {
        self.ui.goto(base_url).await?;
        Ok(self)
    }

    /// Submit the login form
    pub async fn login(&self, user: &str, pass: &str) -> Result<()> {
        self.ui.type_text(USERNAME, user).await?;
        self.ui.type_text(PASSWORD, pass).await?;
        self.ui.click(LOGIN_BUTTON).await
    }
}

//! Step definitions and the scenario catalog
//!
//! Each scenario is a sequence of the reusable steps below, run against the
//! shared [`ScenarioContext`]. Key scenario data (requested and retrieved
//! product fields) is attached to the report as text notes alongside the
//! visual trail.

use futures::future::BoxFuture;
use tracing::info;

use crate::api::ApiClient;
use crate::error::{Error, Result};
use crate::pages::{CartPage, CheckoutPage, LoginPage, ProductsPage};
use crate::scenario::{Scenario, ScenarioContext};

/// The product id every API-backed scenario exercises
pub const PRODUCT_ID: u64 = 4;

/// Expected confirmation message after a completed order
pub const CONFIRMATION_MESSAGE: &str = "Thank you for your order!";

/// All scenarios, in execution order
pub fn catalog() -> Vec<Scenario> {
    vec![
        Scenario::new("product-api-lookup", Box::new(product_api_lookup_step)),
        Scenario::new(
            "login-lands-on-products",
            Box::new(login_lands_on_products_step),
        ),
        Scenario::new("first-item-into-cart", Box::new(first_item_into_cart_step)),
        Scenario::new(
            "checkout-confirmation",
            Box::new(checkout_confirmation_step),
        ),
        Scenario::new("api-ui-cross-check", Box::new(api_ui_cross_check_step)),
    ]
}

// Boxing wrappers: plain `fn` items coerce cleanly into the runner's
// higher-ranked step type, where closures over async fns do not
fn product_api_lookup_step(ctx: &mut ScenarioContext) -> BoxFuture<'_, Result<()>> {
    Box::pin(product_api_lookup(ctx))
}

fn login_lands_on_products_step(ctx: &mut ScenarioContext) -> BoxFuture<'_, Result<()>> {
    Box::pin(login_lands_on_products(ctx))
}

fn first_item_into_cart_step(ctx: &mut ScenarioContext) -> BoxFuture<'_, Result<()>> {
    Box::pin(first_item_into_cart(ctx))
}

fn checkout_confirmation_step(ctx: &mut ScenarioContext) -> BoxFuture<'_, Result<()>> {
    Box::pin(checkout_confirmation(ctx))
}

fn api_ui_cross_check_step(ctx: &mut ScenarioContext) -> BoxFuture<'_, Result<()>> {
    Box::pin(api_ui_cross_check(ctx))
}

// === Scenarios ==========================================================

/// Fetch product 4 from the backend and check the record's shape
async fn product_api_lookup(ctx: &mut ScenarioContext) -> Result<()> {
    let product = fetch_product(ctx, PRODUCT_ID).await?;
    if product.id != PRODUCT_ID {
        return Err(Error::mismatch("product id", PRODUCT_ID, product.id));
    }
    // Non-empty title and non-negative price are already part of the API
    // client's contract; restate the scenario-level expectation anyway
    if product.title.trim().is_empty() {
        return Err(Error::assertion("retrieved product title is empty"));
    }
    if product.price < 0.0 {
        return Err(Error::mismatch("product price", ">= 0", product.price));
    }
    Ok(())
}

/// Valid credentials land on the product listing
async fn login_lands_on_products(ctx: &mut ScenarioContext) -> Result<()> {
    login(ctx).await?;
    let products = ProductsPage::new(ctx.interactor()?);
    if !products.is_at().await? {
        let actual = products.title_text().await?;
        return Err(Error::mismatch("listing title", "Products", actual));
    }
    Ok(())
}

/// The first catalog item shows up in the cart as one parseable line item
async fn first_item_into_cart(ctx: &mut ScenarioContext) -> Result<()> {
    login(ctx).await?;
    add_first_item_and_open_cart(ctx).await?;

    let cart = CartPage::new(ctx.interactor()?);
    let count = cart.item_count().await?;
    if count != 1 {
        return Err(Error::mismatch("cart item count", 1, count));
    }

    let name = cart.item_name().await?;
    if name.is_empty() {
        return Err(Error::assertion("cart item name is empty"));
    }

    let price_text = cart.item_price().await?;
    let price: f64 = price_text.parse().map_err(|_| {
        Error::assertion(format!("cart price `{price_text}` is not a number"))
    })?;
    info!("Cart shows `{name}` at ${price}");
    Ok(())
}

/// Completing checkout reaches the confirmation message
async fn checkout_confirmation(ctx: &mut ScenarioContext) -> Result<()> {
    login(ctx).await?;
    add_first_item_and_open_cart(ctx).await?;
    complete_checkout(ctx, "Jane", "Doe", "60601").await?;

    let checkout = CheckoutPage::new(ctx.interactor()?);
    let message = checkout.confirmation_text().await?;
    if message != CONFIRMATION_MESSAGE {
        return Err(Error::mismatch(
            "confirmation message",
            CONFIRMATION_MESSAGE,
            message,
        ));
    }
    Ok(())
}

/// The UI catalog and the API catalog intentionally differ: the cart's line
/// item must not match the fetched product
async fn api_ui_cross_check(ctx: &mut ScenarioContext) -> Result<()> {
    fetch_product(ctx, PRODUCT_ID).await?;
    login(ctx).await?;
    add_first_item_and_open_cart(ctx).await?;

    let cart = CartPage::new(ctx.interactor()?);
    let ui_name = cart.item_name().await?;
    let price_text = cart.item_price().await?;
    let ui_price: f64 = price_text.parse().map_err(|_| {
        Error::assertion(format!("cart price `{price_text}` is not a number"))
    })?;

    let product = ctx
        .product()
        .ok_or_else(|| Error::assertion("no product was fetched before the cross-check"))?;

    if ui_name == product.title {
        return Err(Error::assertion(format!(
            "UI and API product names unexpectedly match: `{ui_name}`"
        )));
    }
    if (ui_price - product.price).abs() < 0.001 {
        return Err(Error::assertion(format!(
            "UI and API prices unexpectedly match: ${ui_price:.2}"
        )));
    }
    info!(
        "Catalogs differ as expected - UI: `{ui_name}` ${ui_price:.2}, API: `{}` ${:.2}",
        product.title, product.price
    );
    Ok(())
}

// === Steps ==============================================================

/// Fetch a product, attach the key data as notes, and cache it for later
/// steps
async fn fetch_product(ctx: &mut ScenarioContext, id: u64) -> Result<crate::api::Product> {
    info!("Fetching product with ID: {id}");
    ctx.report().attach_note("Product ID Requested", &id.to_string());

    let api = ApiClient::new(&ctx.settings().api_base_url()?, ctx.settings().api_timeout())?;
    let product = api.product_by_id(id).await?;

    info!(
        "Retrieved product - ID: {}, Title: {}, Price: ${}",
        product.id, product.title, product.price
    );
    ctx.report()
        .attach_note("Product ID Retrieved", &product.id.to_string());
    ctx.report().attach_note("Product Title", &product.title);
    ctx.report()
        .attach_note("Product Price", &format!("${}", product.price));

    ctx.set_product(product.clone());
    Ok(product)
}

/// Open the storefront and log in with the configured credentials
async fn login(ctx: &mut ScenarioContext) -> Result<()> {
    let ui = ctx.interactor()?;
    let login = LoginPage::new(ui);
    login.open(&ctx.settings().base_url()?).await?;
    login
        .login(&ctx.settings().username(), &ctx.settings().password())
        .await
}

/// Put the first catalog item into the cart and open the cart view
async fn add_first_item_and_open_cart(ctx: &mut ScenarioContext) -> Result<()> {
    let products = ProductsPage::new(ctx.interactor()?);
    products.add_first_item_to_cart().await?;
    products.go_to_cart().await
}

/// Drive the cart through checkout with the given customer info
async fn complete_checkout(
    ctx: &mut ScenarioContext,
    first: &str,
    last: &str,
    zip_code: &str,
) -> Result<()> {
    let cart = CartPage::new(ctx.interactor()?);
    cart.checkout().await?;
    let checkout = CheckoutPage::new(ctx.interactor()?);
    checkout.fill_info(first, last, zip_code).await?;
    checkout.finish().await
}

//! # Accounts
//!
//! Login and checkout are placeholders. Both are modelled as explicit outcomes so callers have to
//! handle the unimplemented case instead of receiving a silent success.
//!
//! Intended login flow once customers exist:
//! - look up the customer by email
//! - compare the submitted password with the stored one
//! - on match, remember the email in the session, flash a greeting, go to `/melons`
//! - otherwise flash a failure and go back to `/login`
use catalog::Cart;
use serde::Deserialize;
use tracing::info;

pub const LOGIN_NOT_IMPLEMENTED: &str = "Oops! This needs to be implemented";
pub const CHECKOUT_NOT_IMPLEMENTED: &str = "Sorry! Checkout will be implemented in a future version.";

#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginResult {
    Authenticated { email: String },
    Rejected,
    NotImplemented,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutOutcome {
    NotImplemented,
}

pub fn attempt_login(form: &LoginForm) -> LoginResult {
    info!(
        email = %form.email,
        has_password = !form.password.is_empty(),
        "Login attempted"
    );

    LoginResult::NotImplemented
}

/// Always declines, whatever the cart holds.
pub fn checkout(cart: &Cart) -> CheckoutOutcome {
    info!(melons = cart.item_count(), "Checkout attempted");

    CheckoutOutcome::NotImplemented
}

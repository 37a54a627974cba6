//! # Views
//!
//! HTML pages rendered with minijinja. Templates are compiled into the binary so the server has no
//! runtime file dependencies.
//!
//! Undefined template variables are errors rather than empty strings, so a handler that forgets to
//! pass something fails loudly.
use std::str::FromStr;

use axum::response::Html;
use catalog::format_price;
use minijinja::{Environment, Error, ErrorKind, UndefinedBehavior, Value, context};
use rust_decimal::Decimal;

use crate::{error::AppError, session::Session};

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../templates/base.html")),
    ("homepage.html", include_str!("../templates/homepage.html")),
    ("all_melons.html", include_str!("../templates/all_melons.html")),
    ("melon_details.html", include_str!("../templates/melon_details.html")),
    ("cart.html", include_str!("../templates/cart.html")),
    ("login.html", include_str!("../templates/login.html")),
];

pub struct Views {
    env: Environment<'static>,
}

impl Views {
    pub fn new() -> Result<Self, Error> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.add_filter("money", money);

        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }

        Ok(Self { env })
    }

    /// Renders `name` with `ctx` plus the values every page needs. Consumes pending flashes.
    pub fn render(
        &self,
        name: &str,
        session: &mut Session,
        ctx: Value,
    ) -> Result<Html<String>, AppError> {
        let page = context! {
            flashes => session.take_flashes(),
            cart_count => session.cart().item_count(),
            ..ctx
        };

        Ok(Html(self.env.get_template(name)?.render(page)?))
    }
}

/// `{{ price|money }}` -> `$2.50`. Prices reach templates as decimal strings.
fn money(value: &str) -> Result<String, Error> {
    let amount = Decimal::from_str(value).map_err(|e| {
        Error::new(
            ErrorKind::InvalidOperation,
            format!("'{value}' is not an amount: {e}"),
        )
    })?;

    Ok(format_price(amount))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money() {
        assert_eq!(money("0").unwrap(), "$0.00");
        assert_eq!(money("13.5").unwrap(), "$13.50");
        assert_eq!(money("2.97").unwrap(), "$2.97");
        assert!(money("melon").is_err());
    }

    #[test]
    fn test_templates_compile() {
        assert!(Views::new().is_ok());
    }
}

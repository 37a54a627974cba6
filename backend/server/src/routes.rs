use std::sync::Arc;

use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use catalog::build_cart_view;
use minijinja::context;
use tracing::{debug, info};

use crate::{
    account::{
        CHECKOUT_NOT_IMPLEMENTED, CheckoutOutcome, LOGIN_NOT_IMPLEMENTED, LoginForm, LoginResult,
        attempt_login, checkout,
    },
    error::AppError,
    session::Session,
    state::AppState,
};

pub const ADDED_TO_CART: &str = "Melon successfully added to cart!";

pub async fn index_handler(
    State(state): State<Arc<AppState>>,
    mut session: Session,
) -> Result<impl IntoResponse, AppError> {
    let page = state.views.render("homepage.html", &mut session, context! {})?;

    Ok((session, page))
}

pub async fn list_melons_handler(
    State(state): State<Arc<AppState>>,
    mut session: Session,
) -> Result<impl IntoResponse, AppError> {
    let page = state.views.render(
        "all_melons.html",
        &mut session,
        context! { melon_list => state.catalog.get_all() },
    )?;

    Ok((session, page))
}

pub async fn show_melon_handler(
    State(state): State<Arc<AppState>>,
    Path(melon_id): Path<String>,
    mut session: Session,
) -> Result<impl IntoResponse, AppError> {
    let melon = state.catalog.get_by_id(&melon_id)?;
    debug!(
        melon_id = %melon.id,
        price = %melon.price_str(),
        "Showing melon details"
    );

    let page = state.views.render(
        "melon_details.html",
        &mut session,
        context! { display_melon => melon },
    )?;

    Ok((session, page))
}

pub async fn show_cart_handler(
    State(state): State<Arc<AppState>>,
    mut session: Session,
) -> Result<impl IntoResponse, AppError> {
    let view = build_cart_view(session.cart(), |id| state.catalog.get_by_id(id))?;

    let page = state.views.render(
        "cart.html",
        &mut session,
        context! {
            cart => view.line_items,
            order_total => view.order_total,
        },
    )?;

    Ok((session, page))
}

pub async fn add_to_cart_handler(
    Path(melon_id): Path<String>,
    mut session: Session,
) -> impl IntoResponse {
    session.add_to_cart(&melon_id);
    info!(
        melon_id = %melon_id,
        quantity = session.cart().quantity(&melon_id),
        "Added to cart"
    );

    session.flash(ADDED_TO_CART);

    (session, Redirect::to("/cart"))
}

pub async fn show_login_handler(
    State(state): State<Arc<AppState>>,
    mut session: Session,
) -> Result<impl IntoResponse, AppError> {
    let page = state.views.render("login.html", &mut session, context! {})?;

    Ok((session, page))
}

pub async fn process_login_handler(mut session: Session, Form(form): Form<LoginForm>) -> Response {
    match attempt_login(&form) {
        LoginResult::Authenticated { email } => {
            session.flash(format!("Logged in as {email}"));
            (session, Redirect::to("/melons")).into_response()
        }
        LoginResult::Rejected => {
            session.flash("Incorrect email or password.");
            (session, Redirect::to("/login")).into_response()
        }
        LoginResult::NotImplemented => {
            (StatusCode::NOT_IMPLEMENTED, LOGIN_NOT_IMPLEMENTED).into_response()
        }
    }
}

pub async fn checkout_handler(mut session: Session) -> impl IntoResponse {
    match checkout(session.cart()) {
        CheckoutOutcome::NotImplemented => {
            session.flash(CHECKOUT_NOT_IMPLEMENTED);
            (session, Redirect::to("/melons"))
        }
    }
}

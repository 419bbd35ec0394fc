//! App Router

use salvo::Router;

use crate::{orders, payments, products, users};

/// Every resource route. Search routes are registered ahead of `{id}` so
/// that `search` is never parsed as an identifier.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(
            Router::with_path("users")
                .get(users::index::handler)
                .post(users::create::handler)
                .push(
                    Router::with_path("search")
                        .get(users::search::by_name)
                        .push(Router::with_path("email/{email}").get(users::search::by_email)),
                )
                .push(
                    Router::with_path("{id}")
                        .get(users::get::handler)
                        .put(users::update::handler)
                        .delete(users::delete::handler),
                ),
        )
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .post(products::create::handler)
                .push(
                    Router::with_path("search")
                        .push(Router::with_path("name").get(products::search::by_name))
                        .push(Router::with_path("category").get(products::search::by_category)),
                )
                .push(
                    Router::with_path("{id}")
                        .get(products::get::handler)
                        .put(products::update::handler)
                        .delete(products::delete::handler),
                ),
        )
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .post(orders::create::handler)
                .push(
                    Router::with_path("search")
                        .get(orders::search::by_status)
                        .push(Router::with_path("{user}").get(orders::search::by_user)),
                )
                .push(
                    Router::with_path("{id}")
                        .get(orders::get::handler)
                        .put(orders::update::handler)
                        .delete(orders::delete::handler),
                ),
        )
        .push(
            Router::with_path("payments")
                .get(payments::index::handler)
                .post(payments::create::handler)
                .push(
                    Router::with_path("search")
                        .get(payments::search::by_status)
                        .push(Router::with_path("user/{user_id}").get(payments::search::by_user))
                        .push(Router::with_path("{order_id}").get(payments::search::by_order)),
                )
                .push(
                    Router::with_path("{id}")
                        .get(payments::get::handler)
                        .put(payments::update::handler)
                        .delete(payments::delete::handler),
                ),
        )
}

//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};

use storefront_app::{
    context::AppContext, orders::MockOrdersService, payments::MockPaymentsService,
    products::MockProductsService, users::MockUsersService,
};

use crate::state::State;

/// Stand-in storage failure for exercising 500 paths.
pub(crate) fn storage_error() -> sqlx::Error {
    sqlx::Error::PoolTimedOut
}

fn strict_users_mock() -> MockUsersService {
    let mut users = MockUsersService::new();

    users.expect_list_users().never();
    users.expect_get_user().never();
    users.expect_create_user().never();
    users.expect_update_user().never();
    users.expect_delete_user().never();
    users.expect_search_users_by_name().never();
    users.expect_find_user_by_email().never();

    users
}

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_get_product().never();
    products.expect_create_product().never();
    products.expect_update_product().never();
    products.expect_delete_product().never();
    products.expect_search_products_by_name().never();
    products.expect_search_products_by_category().never();

    products
}

fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_list_orders().never();
    orders.expect_get_order().never();
    orders.expect_create_order().never();
    orders.expect_update_order().never();
    orders.expect_delete_order().never();
    orders.expect_search_orders_by_user().never();
    orders.expect_search_orders_by_status().never();

    orders
}

fn strict_payments_mock() -> MockPaymentsService {
    let mut payments = MockPaymentsService::new();

    payments.expect_list_payments().never();
    payments.expect_get_payment().never();
    payments.expect_create_payment().never();
    payments.expect_update_payment().never();
    payments.expect_delete_payment().never();
    payments.expect_search_payments_by_user().never();
    payments.expect_search_payments_by_order().never();
    payments.expect_search_payments_by_status().never();

    payments
}

/// Context whose services all reject any call.
fn strict_context() -> AppContext {
    AppContext {
        users: Arc::new(strict_users_mock()),
        products: Arc::new(strict_products_mock()),
        orders: Arc::new(strict_orders_mock()),
        payments: Arc::new(strict_payments_mock()),
    }
}

fn service(app: AppContext, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(State::from_app_context(app)))
            .push(route),
    )
}

pub(crate) fn users_service(users: MockUsersService, route: Router) -> Service {
    service(
        AppContext {
            users: Arc::new(users),
            ..strict_context()
        },
        route,
    )
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    service(
        AppContext {
            products: Arc::new(products),
            ..strict_context()
        },
        route,
    )
}

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    service(
        AppContext {
            orders: Arc::new(orders),
            ..strict_context()
        },
        route,
    )
}

pub(crate) fn payments_service(payments: MockPaymentsService, route: Router) -> Service {
    service(
        AppContext {
            payments: Arc::new(payments),
            ..strict_context()
        },
        route,
    )
}

//! Path identifier parsing.

use salvo::{oapi::extract::PathParam, prelude::StatusError};

use storefront_app::ids::TypedId;

use crate::extensions::*;

/// Parse a raw path segment into a typed id, rejecting anything that is not
/// a positive integer with a 400 carrying `message`.
pub(crate) trait PathIdExt {
    fn into_id<T>(self, message: &str) -> Result<TypedId<T>, StatusError>;
}

impl PathIdExt for PathParam<String> {
    fn into_id<T>(self, message: &str) -> Result<TypedId<T>, StatusError> {
        self.into_inner().parse::<TypedId<T>>().or_400(message)
    }
}

//! User Records

use jiff::Timestamp;

use crate::ids::TypedId;

/// User Id
pub type UserId = TypedId<UserRecord>;

/// Roles a user may hold.
pub const USER_ROLES: &[&str] = &["admin", "client"];

/// User Record
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub address: String,
    pub registration_date: Timestamp,
    pub role: String,
}

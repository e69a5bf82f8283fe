//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence adapter; the repository converts
//! them into domain [`User`](crate::domain::User) values.

use diesel::prelude::*;

use super::schema::{user_deletes, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub username: String,
    pub email: String,
}

/// Insertable struct for registering a user.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub email: &'a str,
}

/// Insertable tombstone marking a user as deleted.
#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = user_deletes)]
pub(crate) struct NewUserDeleteRow {
    pub user_id: i32,
}

//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` when a migration changes a table.

diesel::table! {
    /// Registered users. Rows are never removed; see `user_deletes`.
    users (id) {
        /// Store-assigned serial identifier.
        id -> Int4,
        username -> Text,
        /// Unique across every row, deleted users included.
        email -> Text,
    }
}

diesel::table! {
    /// Soft-delete tombstones, at most one per user.
    user_deletes (user_id) {
        /// References `users.id`; unique so a user is deleted only once.
        user_id -> Int4,
    }
}

diesel::joinable!(user_deletes -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(users, user_deletes);

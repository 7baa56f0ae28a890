//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. The
//! `diesel print-schema` command can regenerate them from a live database.

diesel::table! {
    /// Characters served by the lookup endpoint.
    ///
    /// `id` is the primary key, so at most one row matches any id.
    characters (id) {
        id -> Int8,
        first_name -> Varchar,
        last_name -> Varchar,
        /// Optional alias; `NULL` when the character has none.
        nick_name -> Nullable<Varchar>,
    }
}

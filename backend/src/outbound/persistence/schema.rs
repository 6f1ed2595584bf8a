//! Diesel table definitions.
//!
//! Keep in sync with `backend/migrations`.

diesel::table! {
    /// Registered users.
    ///
    /// `id` is a storage-only surrogate key; lookups go through the unique
    /// `email` column.
    users (id) {
        id -> Int8,
        first_name -> Nullable<Text>,
        last_name -> Nullable<Text>,
        mobile -> Nullable<Text>,
        /// Natural key, unique across rows.
        email -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

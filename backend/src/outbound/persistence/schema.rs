//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly.

diesel::table! {
    /// Registered directory entries shown on the map.
    users (guid) {
        /// Primary key: UUID v4 rendered as text.
        guid -> Text,
        name -> Text,
        email -> Text,
        website -> Text,
        latitude -> Double,
        longitude -> Double,
        /// Notification preference stored as `0` or `1`.
        email_updates -> Integer,
        /// Registration timestamp; drives listing order.
        created_at -> Timestamptz,
    }
}

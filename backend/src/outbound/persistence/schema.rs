//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate
//! with `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts. `role` is one of `donor`, `ngo`, `admin`.
    users (id) {
        id -> Uuid,
        name -> Varchar,
        email -> Varchar,
        role -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Donor listings. `status` is `available` or `claimed`.
    food_listings (id) {
        id -> Uuid,
        name -> Varchar,
        quantity -> Int4,
        expiry_date -> Date,
        location -> Varchar,
        donor_id -> Uuid,
        status -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// NGO requests. `food_id` has no foreign key.
    food_requests (id) {
        id -> Uuid,
        food_id -> Uuid,
        quantity -> Int4,
        ngo_id -> Uuid,
        status -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(food_listings -> users (donor_id));
diesel::joinable!(food_requests -> users (ngo_id));

diesel::allow_tables_to_appear_in_same_query!(users, food_listings, food_requests);

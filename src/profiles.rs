//! Seller profile creation and lookup
//!
//! A profile is created once, right after registration, keyed by the auth
//! user id. Only the owner ever mutates it, which row-level security enforces
//! on the backend side.

use uuid::Uuid;

use crate::error::Error;
use crate::model::{NewProfile, Profile};
use crate::Supabase;

/// Insert the profile row for a freshly registered user.
pub async fn create_profile(
    supabase: &Supabase,
    token: &str,
    profile: NewProfile,
) -> Result<(), Error> {
    supabase
        .from("profiles")
        .insert(profile)
        .auth(token)
        .execute_no_return()
        .await
}

/// Fetch a profile by user id. `Ok(None)` when the user has no profile row,
/// which the pages treat as "registration incomplete".
pub async fn fetch_profile(
    supabase: &Supabase,
    token: &str,
    user_id: Uuid,
) -> Result<Option<Profile>, Error> {
    supabase
        .from("profiles")
        .select("*")
        .auth(token)
        .eq("id", user_id)
        .execute_one::<Profile>()
        .await
}

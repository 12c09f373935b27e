//! Seller profile records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Application role of a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Seller,
    Admin,
}

/// What kind of seller a profile represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SellerType {
    Individual,
    Agent,
    Developer,
}

/// Identity record for a seller or admin, keyed by the auth user id.
/// Created once at registration and mutated only by its owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub role: UserRole,
    pub seller_type: Option<SellerType>,
    pub company_name: Option<String>,
    pub whatsapp_number: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a new profile
#[derive(Debug, Clone, Serialize)]
pub struct NewProfile {
    pub id: Uuid,
    pub role: UserRole,
    pub seller_type: Option<SellerType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    pub whatsapp_number: String,
}

impl Profile {
    /// Whether this profile carries the admin role
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Whether this profile carries the seller role
    pub fn is_seller(&self) -> bool {
        self.role == UserRole::Seller
    }
}

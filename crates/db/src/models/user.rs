//! User account model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use reqdesk_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password hash -- never serialized. Use [`UserInfo`] for
/// anything that leaves the server.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub password_hash: String,
    pub nombre_completo: String,
    pub rol: String,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Public user representation returned on login.
#[derive(Debug, Clone, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub username: String,
    pub nombre_completo: String,
    pub rol: String,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            nombre_completo: user.nombre_completo.clone(),
            rol: user.rol.clone(),
        }
    }
}

/// DTO for creating a user. `rol` defaults to `user` in the database.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub password_hash: String,
    pub nombre_completo: String,
    pub rol: Option<String>,
}

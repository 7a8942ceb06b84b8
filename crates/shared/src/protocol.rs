use serde::{Deserialize, Serialize};

use crate::domain::{Role, RoleId};

/// One entry of `GET /rol/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRecord {
    pub id: RoleId,
    pub name_rol: String,
}

impl From<RoleRecord> for Role {
    fn from(record: RoleRecord) -> Self {
        Self {
            id: record.id,
            display_name: record.name_rol,
        }
    }
}

/// JSON body of `POST /auth/register`.
///
/// Field names follow the registration endpoint, not Rust conventions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    #[serde(rename = "Cedula_persona")]
    pub national_id: String,
    #[serde(rename = "Edad_persona")]
    pub age: String,
    #[serde(rename = "Telefono_persona")]
    pub phone: String,
    #[serde(rename = "Rol_persona")]
    pub role_id: RoleId,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

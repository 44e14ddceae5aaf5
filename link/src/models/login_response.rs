use super::UserInfo;
use serde::{Deserialize, Serialize};

/// Successful login: the Bearer token plus the user it identifies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

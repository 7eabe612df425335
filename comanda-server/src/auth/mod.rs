//! 认证与角色
//!
//! 只做令牌校验和角色授权；令牌签发由外部认证服务负责。
//! 角色只影响授权，不影响业务逻辑：顾客和服务员走同一条下单路径。

pub mod extractor;
pub mod jwt;

pub use jwt::{Claims, JwtConfig, JwtError, JwtService};

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::AppError;

/// Actor roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Waiter,
    Cook,
    Cashier,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Waiter => "waiter",
            Role::Cook => "cook",
            Role::Cashier => "cashier",
            Role::Admin => "admin",
        }
    }

    /// Parse a role claim (case-insensitive)
    pub fn parse(value: &str) -> Option<Role> {
        match value.to_ascii_lowercase().as_str() {
            "customer" => Some(Role::Customer),
            "waiter" => Some(Role::Waiter),
            "cook" => Some(Role::Cook),
            "cashier" => Some(Role::Cashier),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated actor performing a request
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub name: String,
    pub role: Role,
}

impl CurrentUser {
    /// Authorize against an allowed-role list. Admin passes everything.
    pub fn require_any(&self, allowed: &[Role]) -> Result<(), AppError> {
        if self.role == Role::Admin || allowed.contains(&self.role) {
            Ok(())
        } else {
            Err(AppError::forbidden(format!(
                "Role '{}' cannot perform this operation",
                self.role
            )))
        }
    }
}

impl TryFrom<Claims> for CurrentUser {
    type Error = String;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let role =
            Role::parse(&claims.role).ok_or_else(|| format!("unknown role '{}'", claims.role))?;
        Ok(Self {
            id: claims.sub,
            name: claims.name,
            role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> CurrentUser {
        CurrentUser {
            id: "user:1".to_string(),
            name: "Test".to_string(),
            role,
        }
    }

    #[test]
    fn role_parsing_is_case_insensitive() {
        assert_eq!(Role::parse("Waiter"), Some(Role::Waiter));
        assert_eq!(Role::parse("COOK"), Some(Role::Cook));
        assert_eq!(Role::parse("manager"), None);
    }

    #[test]
    fn admin_passes_every_check() {
        assert!(user(Role::Admin).require_any(&[Role::Cashier]).is_ok());
        assert!(user(Role::Cook).require_any(&[Role::Cashier]).is_err());
        assert!(
            user(Role::Waiter)
                .require_any(&[Role::Customer, Role::Waiter])
                .is_ok()
        );
    }
}

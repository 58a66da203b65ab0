use serde::{Deserialize, Serialize};

/// Role reported by the auth provider. Only the exact string "admin" is an
/// admin; any other role reads as regular.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    #[default]
    #[serde(other)]
    Regular,
}

/// An authenticated visitor as returned by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visitor {
    pub id: String,
    #[serde(default)]
    pub role: Role,
}

impl Visitor {
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self { id: id.into(), role }
    }

    pub fn regular(id: impl Into<String>) -> Self {
        Self::new(id, Role::Regular)
    }

    pub fn admin(id: impl Into<String>) -> Self {
        Self::new(id, Role::Admin)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role_of(raw: &str) -> Role {
        let json = format!(r#"{{"id":"v1","role":"{raw}"}}"#);
        serde_json::from_str::<Visitor>(&json).unwrap().role
    }

    #[test]
    fn only_exact_admin_is_admin() {
        assert_eq!(role_of("admin"), Role::Admin);
        assert_eq!(role_of("Admin"), Role::Regular);
        assert_eq!(role_of("ADMIN"), Role::Regular);
        assert_eq!(role_of("editor"), Role::Regular);
    }

    #[test]
    fn missing_role_is_regular() {
        let visitor: Visitor = serde_json::from_str(r#"{"id":"v1"}"#).unwrap();
        assert!(!visitor.is_admin());
    }
}

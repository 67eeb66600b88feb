//! User-related entity definitions.

use serde::{Deserialize, Serialize};

/// Colour tokens offered when registering a new user.
pub const COLOR_PALETTE: &[&str] = &[
    "teal",
    "powderblue",
    "tomato",
    "yellowgreen",
    "orange",
    "plum",
    "khaki",
    "salmon",
    "skyblue",
    "gold",
];

/// A registered member of the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Store-generated identifier, ascending in creation order.
    pub id: i64,
    /// Display name, unique across the roster.
    pub name: String,
    /// Display colour token used for the user's tab and map highlights.
    pub color: String,
}

/// Payload for inserting a new user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Display colour token.
    pub color: String,
}

impl NewUser {
    /// Creates a new user payload.
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }

    /// Materializes the payload as a stored user with the given id.
    pub fn into_user(self, id: i64) -> User {
        User {
            id,
            name: self.name,
            color: self.color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_into_user() {
        let user = NewUser::new("Angela", "teal").into_user(1);

        assert_eq!(user.id, 1);
        assert_eq!(user.name, "Angela");
        assert_eq!(user.color, "teal");
    }

    #[test]
    fn test_user_serialization() {
        let user = NewUser::new("Jack", "powderblue").into_user(2);
        let json = serde_json::to_value(&user).unwrap();

        assert_eq!(json["id"], 2);
        assert_eq!(json["name"], "Jack");
        assert_eq!(json["color"], "powderblue");
    }

    #[test]
    fn test_palette_has_no_duplicates() {
        let mut colors = COLOR_PALETTE.to_vec();
        colors.sort_unstable();
        colors.dedup();
        assert_eq!(colors.len(), COLOR_PALETTE.len());
    }
}

//! Example user setup.

use super::REALM;
use crate::client::AdminClient;
use crate::error::{SetupError, SetupResult};
use crate::representation::{CredentialRepresentation, UserRepresentation};

/// Password given to every example user.
pub const PASSWORD: &str = "password";

/// An example user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExampleUser {
    /// Username.
    pub username: &'static str,
    /// First name.
    pub first_name: &'static str,
    /// Last name.
    pub last_name: &'static str,
    /// Email address.
    pub email: &'static str,
}

/// Users created by the setup, in creation order.
pub const USERS: [ExampleUser; 2] = [
    ExampleUser {
        username: "mmustermann",
        first_name: "Max",
        last_name: "Mustermann",
        email: "mmustermann@example.com",
    },
    ExampleUser {
        username: "jdoe",
        first_name: "John",
        last_name: "Doe",
        email: "jdoe@example.com",
    },
];

impl ExampleUser {
    /// Builds the create-user request with a permanent password.
    #[must_use]
    pub fn representation(&self) -> UserRepresentation {
        UserRepresentation {
            username: self.username.to_string(),
            first_name: Some(self.first_name.to_string()),
            last_name: Some(self.last_name.to_string()),
            email: Some(self.email.to_string()),
            enabled: true,
            credentials: vec![CredentialRepresentation::password(PASSWORD, false)],
        }
    }
}

/// Creates the example users and returns their IDs in creation order.
pub async fn setup_users(client: &AdminClient) -> SetupResult<Vec<String>> {
    let path = format!("/{REALM}/users");
    let mut ids = Vec::with_capacity(USERS.len());

    for user in &USERS {
        let id = client
            .create(&path, &user.representation(), "user", user.username)
            .await?
            .ok_or_else(|| SetupError::MissingLocation(format!("user {}", user.username)))?;
        tracing::info!(username = user.username, user_id = %id, "user created");
        ids.push(id);
    }

    Ok(ids)
}

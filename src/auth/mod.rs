pub mod csrf;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::Validate;

// Re-export necessary items
pub use csrf::{csrf_matches, generate_csrf_secret, CSRF_HEADER};
pub use password::{hash_password, verify_password};
pub use token::{access_token_cookie, Claims, TokenService, ACCESS_TOKEN_COOKIE};

/// Represents the payload for a new user registration request.
///
/// The minimum password length is checked in the signup handler so the
/// rejection carries its exact message.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    /// Email address for the new account.
    #[validate(email)]
    pub email: String,
    /// Password for the new account. Must be at least 6 characters long.
    pub password: String,
}

/// Represents the payload for a user login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// User's email address.
    #[validate(email)]
    pub email: String,
    /// User's password.
    pub password: String,
}

/// Body returned on successful login.
///
/// The session token itself travels in the access-token cookie; the CSRF token
/// is handed to the client here so it can be echoed back in the `x-csrf-token`
/// header on every mutating request. Renewal keeps the embedded secret stable,
/// so this value stays valid for the whole session.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub csrf_token: String,
}

/// Generic message body for responses that carry no record data.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_signup_request_validation() {
        let valid_signup = SignupRequest {
            email: "test@example.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(valid_signup.validate().is_ok());

        let invalid_email_signup = SignupRequest {
            email: "testexample.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(invalid_email_signup.validate().is_err());
    }

    #[test]
    fn test_login_request_validation() {
        let valid_login = LoginRequest {
            email: "test@example.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(valid_login.validate().is_ok());

        let invalid_email_login = LoginRequest {
            email: "not-an-email".to_string(),
            password: "password123".to_string(),
        };
        assert!(invalid_email_login.validate().is_err());
    }
}

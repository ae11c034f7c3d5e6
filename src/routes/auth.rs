use crate::{
    auth::{
        generate_csrf_secret, hash_password,
        token::{access_token_cookie, clear_access_token_cookie},
        verify_password, LoginRequest, LoginResponse, MessageResponse, SignupRequest,
        TokenService,
    },
    error::AppError,
    store::Store,
};
use actix_web::{post, web, HttpRequest, HttpResponse, Responder};
use validator::Validate;

/// Register a new user.
///
/// Rejects a duplicate email with 409 and a password shorter than 6
/// characters with 400. Input is checked before any store round trip. The
/// response carries the public user view; the hash never leaves the server.
#[post("/signup")]
pub async fn signup(
    store: web::Data<Store>,
    signup_data: web::Json<SignupRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    signup_data.validate()?;
    if signup_data.password.len() < 6 {
        return Err(AppError::BadRequest("Password too short".into()));
    }

    // Check if email already exists
    if store
        .find_credential_by_email(&signup_data.email)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("Email is already taken".into()));
    }

    let password_hash = hash_password(&signup_data.password)?;
    let user = store
        .insert_credential(&signup_data.email, &password_hash)
        .await?;

    Ok(HttpResponse::Created().json(user))
}

/// Login user.
///
/// Verifies the credentials, then issues a session token embedding a fresh
/// CSRF secret. The token travels in the access-token cookie; the CSRF secret
/// is returned in the body for the client to echo in the `x-csrf-token`
/// header. An unknown email and a wrong password produce the same answer.
#[post("/login")]
pub async fn login(
    store: web::Data<Store>,
    tokens: web::Data<TokenService>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    let credential = store.find_credential_by_email(&login_data.email).await?;
    let credential = match credential {
        Some(c) if verify_password(&login_data.password, &c.password_hash) => c,
        _ => return Err(AppError::Unauthorized("Invalid email or password".into())),
    };

    let csrf_secret = generate_csrf_secret();
    let token = tokens.encode_token(&credential.email, &csrf_secret)?;

    Ok(HttpResponse::Ok()
        .cookie(access_token_cookie(&token))
        .json(LoginResponse {
            message: "Successfully logged-in".into(),
            csrf_token: csrf_secret,
        }))
}

/// Logout user.
///
/// A state-changing request like any other: requires a valid session token
/// and a matching CSRF header, then clears the session cookie.
#[post("/logout")]
pub async fn logout(
    tokens: web::Data<TokenService>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    tokens.verify_csrf_and_renew(&req)?;

    Ok(HttpResponse::Ok()
        .cookie(clear_access_token_cookie())
        .json(MessageResponse {
            message: "Successfully logged-out".into(),
        }))
}

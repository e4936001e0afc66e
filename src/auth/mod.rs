//! Credential verification and token issuance
//!
//! This module provides the authentication infrastructure for the Tally API:
//! Argon2id password hashing, HS256 JWT issuance, and the Axum middleware
//! that guards protected routes.
//!
//! # Module Structure
//!
//! - [`auth::jwt`](crate::auth::jwt) - Password hashing and JWT encoding/decoding
//! - [`auth::middleware`](crate::auth::middleware) - Axum layer and extractor for bearer tokens
//!
//! # Security Properties
//!
//! - **Password Hashing**: Argon2id with a fresh salt per hash; plaintext
//!   secrets are never persisted or logged
//! - **Tokens**: HS256-signed, time-boxed (1 hour by default), carrying the
//!   account id and email as claims
//! - **Non-enumeration**: an unknown email and a wrong password produce an
//!   identical external failure (`"Authentication failed"`)
//!
//! # Configuration
//!
//! The signing secret is injected at construction time, resolved from the
//! environment variable named in `tally.toml`:
//!
//! ```toml
//! [auth]
//! jwt_secret_env = "JWT_SECRET"
//! token_expiry = 3600
//! ```

/// Password hashing and JWT token services.
pub mod jwt;
/// Authentication middleware and extractor for protected routes.
pub mod middleware;

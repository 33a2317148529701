/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - Hand the principal stored by middleware::auth::access to handlers
 * - `AuthPrincipal` for routes that need a user, `Option<AuthPrincipal>` for routes that don't
 */

mod core;

pub use core::AuthPrincipal;

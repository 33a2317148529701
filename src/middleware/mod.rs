/*
 * Responsibility
 * - Public surface of the middleware layer
 * - auth: bearer JWT → principal; http/cors/security_headers: transport concerns
 */
pub mod auth;
pub mod bearer_auth;
pub mod cors;
pub mod http;
pub mod security_headers;

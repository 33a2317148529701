pub mod factory;
pub mod principal;
pub mod resolver;
pub mod token;

pub use factory::build_jwt_codec;
pub use principal::{UserDetails, UserPrincipal};
pub use resolver::{IdentityResolver, ResolveError};
pub use token::{JwtCodec, TokenError};

mod token;
pub use token::*;

mod group;
pub use group::*;

mod hydrate;
pub use hydrate::*;

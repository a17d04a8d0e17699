pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::{NewUser, ProfileUpdate, User};
pub use errors::UserError;
pub use ports::{PasswordHasher, TokenGenerator, UserRepository};
pub use services::{SecurityPolicy, UserService};
pub use value_objects::{Email, Password, PasswordHash, PersonName, ResetToken, Role, TokenHash};

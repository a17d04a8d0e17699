pub mod delete_user;
pub mod dto;
pub mod forgot_password;
pub mod register_user;
pub mod reset_password;
pub mod show_user;
pub mod update_profile;

pub use delete_user::{DeleteUserCommand, DeleteUserUseCase};
pub use dto::UserDto;
pub use forgot_password::{ForgotPasswordCommand, ForgotPasswordResponse, ForgotPasswordUseCase};
pub use register_user::{RegisterUserCommand, RegisterUserUseCase};
pub use reset_password::{ResetPasswordCommand, ResetPasswordUseCase};
pub use show_user::{ShowUserCommand, ShowUserUseCase};
pub use update_profile::{UpdateProfileCommand, UpdateProfileUseCase};

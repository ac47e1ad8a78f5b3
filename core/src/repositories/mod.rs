//! Repository interfaces consumed by the domain services.

pub mod user;

pub use user::UserRepository;

pub use user::MockUserRepository;

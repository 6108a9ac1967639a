//! Privacy primitives: field encryption, access-password hashing, and
//! phone normalization.

pub mod codec;
pub mod password;
pub mod phone;

pub use codec::{FieldCodec, IV_LEN, KEY_LEN, UNAVAILABLE};
pub use password::{
    hash_password, validate_password, verify_password, PasswordError, MAX_PASSWORD_LENGTH,
    MIN_PASSWORD_LENGTH,
};
pub use phone::{format_phone, strip_phone};

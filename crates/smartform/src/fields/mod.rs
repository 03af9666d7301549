//! Shorthand constructors for common field kinds.

mod select;
mod text;

pub use select::select_field;
pub use text::{
    char_field, email_field, number_field, password_field, phone_field, textarea_field, url_field,
};

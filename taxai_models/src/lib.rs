pub mod contact;
pub mod language;

//! Configuration portal: field table, form handling and HTML pages.

mod fields;
mod form;
mod pages;

pub use fields::{FieldGroup, FieldId, FieldKind, FIELD_GROUPS};
pub use form::{FieldError, FormErrors, RejectedForm, apply_form};
pub use pages::{ROOT_TITLE, render_config_page, render_not_found, render_root_page};

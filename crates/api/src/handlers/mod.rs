//! Request handlers, one submodule per resource.
//!
//! Read handlers return a JSON context for the presentation layer. Mutating
//! handlers redirect with `303 See Other`. Errors are mapped via [`AppError`].

pub mod accounts;
pub mod cats;
pub mod feedings;
pub mod pages;
pub mod photos;
pub mod toys;

use axum::extract::rejection::FormRejection;
use axum::Form;
use catcollector_core::error::CoreError;

use crate::error::{AppError, AppResult};

/// Unwrap a form body, reporting undecodable input (e.g. a non-numeric age)
/// as a validation error instead of axum's default 422.
pub(crate) fn form_input<T>(form: Result<Form<T>, FormRejection>) -> AppResult<T> {
    form.map(|Form(input)| input)
        .map_err(|rejection| AppError::Core(CoreError::Validation(rejection.body_text())))
}

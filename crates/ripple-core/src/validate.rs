//! Bridges `validator`'s error tree into the flat field -> messages report
//! the error taxonomy carries.

use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::error::{DomainError, ValidationReport};

/// Run an input's declared rules, converting any failure into
/// [`DomainError::Validation`].
pub fn check<T: Validate>(input: &T) -> Result<(), DomainError> {
    input
        .validate()
        .map_err(|errors| DomainError::Validation(report(&errors)))
}

/// Flatten a `ValidationErrors` tree. Nested struct errors become
/// `parent.field`, list entries `parent[index].field`.
pub fn report(errors: &ValidationErrors) -> ValidationReport {
    let mut out = ValidationReport::new();
    collect("", errors, &mut out);
    out
}

fn collect(prefix: &str, errors: &ValidationErrors, out: &mut ValidationReport) {
    for (field, kind) in errors.errors() {
        let name = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(failures) => {
                for failure in failures {
                    let message = failure
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| failure.code.to_string());
                    out.push(&name, message);
                }
            }
            ValidationErrorsKind::Struct(inner) => collect(&name, inner, out),
            ValidationErrorsKind::List(entries) => {
                for (index, inner) in entries {
                    collect(&format!("{name}[{index}]"), inner, out);
                }
            }
        }
    }
}

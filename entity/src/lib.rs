//! Persisted HR records: sea-orm entities, choice tables and field validators.

pub mod employee;
pub mod employee_draft;
pub mod employee_draft_specialization;
pub mod employee_specialization;
pub mod news_article;
pub mod position;
pub mod specialization;
pub mod user;
pub mod validation;

pub use validation::ValidationError;

/// Shared behaviour of the closed code sets stored as strings.
pub trait Choice: Sized + Copy + 'static {
    /// Human readable label shown in the back office.
    fn label(self) -> &'static str;

    /// Every declared variant, in declaration order.
    fn all() -> Vec<Self>;
}

/// Looks a stored code up in a choice table.
pub fn parse_choice<T>(field: &'static str, code: &str) -> Result<T, ValidationError>
where
    T: Choice + sea_orm::ActiveEnum<Value = String>,
{
    T::all()
        .into_iter()
        .find(|variant| variant.to_value() == code)
        .ok_or_else(|| ValidationError::InvalidChoice {
            field,
            value: code.to_string(),
        })
}

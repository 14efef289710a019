use serde::Deserialize;

pub const PASSWORDS_DIFFER: &str = "Passwords are not equals";
pub const USER_EXISTS: &str = "User is already exist";

/// Submitted registration fields. Absent fields stay `None` so they reach validation.
#[derive(Debug, Default, Deserialize)]
pub struct RegistrationForm {
    pub username: Option<String>,
    pub password: Option<String>,
    pub password2: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}

impl RegistrationForm {
    /// A password was given and the confirmation does not repeat it.
    pub fn passwords_differ(&self) -> bool {
        match &self.password {
            Some(password) => Some(password) != self.password2.as_ref(),
            None => false,
        }
    }

    pub fn field_errors(&self) -> Vec<FieldError> {
        let checks = [
            ("username", &self.username, "Username cannot be empty"),
            ("password", &self.password, "Password cannot be empty"),
            ("password2", &self.password2, "Password confirmation cannot be empty"),
        ];

        checks
            .into_iter()
            .filter(|(_, value, _)| is_blank(value))
            .map(|(field, _, message)| FieldError { field, message })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(username: Option<&str>, password: Option<&str>, password2: Option<&str>) -> RegistrationForm {
        RegistrationForm {
            username: username.map(str::to_owned),
            password: password.map(str::to_owned),
            password2: password2.map(str::to_owned),
        }
    }

    #[test]
    fn matching_passwords_do_not_differ() {
        assert!(!form(Some("ann"), Some("pw"), Some("pw")).passwords_differ());
    }

    #[test]
    fn mismatched_or_missing_confirmation_differs() {
        assert!(form(Some("ann"), Some("pw"), Some("wp")).passwords_differ());
        assert!(form(Some("ann"), Some("pw"), None).passwords_differ());
        assert!(form(Some("ann"), Some(""), Some("x")).passwords_differ());
    }

    #[test]
    fn absent_password_is_left_to_validation() {
        let form = form(Some("ann"), None, Some("pw"));
        assert!(!form.passwords_differ());
        assert_eq!(
            form.field_errors(),
            vec![FieldError { field: "password", message: "Password cannot be empty" }]
        );
    }

    #[test]
    fn blank_fields_are_reported_per_field() {
        let errors = form(Some("  "), Some(""), Some("")).field_errors();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, ["username", "password", "password2"]);
    }

    #[test]
    fn complete_form_has_no_errors() {
        assert!(form(Some("ann"), Some("pw"), Some("pw")).field_errors().is_empty());
    }
}

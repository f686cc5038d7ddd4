use thiserror::Error;

#[derive(Error, Hash, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Required(field))
    } else {
        Ok(())
    }
}

pub fn validate_guess(guess: &str) -> Result<(), ValidationError> {
    require("guess", guess)
}

pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    require("username", username)
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    require("password", password)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_values_are_rejected() {
        assert_eq!(validate_guess(""), Err(ValidationError::Required("guess")));
        assert_eq!(validate_guess("   "), Err(ValidationError::Required("guess")));
        assert_eq!(
            validate_username(""),
            Err(ValidationError::Required("username"))
        );
        assert_eq!(
            validate_password(""),
            Err(ValidationError::Required("password"))
        );
    }

    #[test]
    fn present_values_pass() {
        assert_eq!(validate_guess("dog"), Ok(()));
        assert_eq!(validate_username("joe"), Ok(()));
        assert_eq!(validate_password("hunter2"), Ok(()));
    }

    #[test]
    fn errors_name_the_field() {
        let err = validate_password("").unwrap_err();
        assert_eq!(err.to_string(), "password is required");
    }
}

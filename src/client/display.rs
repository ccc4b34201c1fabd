// src/client/display.rs
pub const MASK_CHAR: char = '•';

/// One mask character per password character
pub fn mask(password: &str) -> String {
    std::iter::repeat(MASK_CHAR).take(password.chars().count()).collect()
}

/// The current password and whether it is shown in the clear
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordDisplay {
    password: Option<String>,
    hidden: bool,
}

impl PasswordDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the displayed password. The visibility mode is kept.
    pub fn set(&mut self, password: impl Into<String>) {
        self.password = Some(password.into());
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Flip between plain and masked; returns the new hidden state
    pub fn toggle(&mut self) -> bool {
        self.hidden = !self.hidden;
        self.hidden
    }

    /// What the user should see right now
    pub fn render(&self) -> String {
        match (&self.password, self.hidden) {
            (Some(password), true) => mask(password),
            (Some(password), false) => password.clone(),
            (None, _) => String::new(),
        }
    }
}

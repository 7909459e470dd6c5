/// A user principal as known to the backing store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// User name; the last segment of the principal URL.
    pub name: String,
    pub email: Option<String>,
}

impl Principal {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: None,
        }
    }

    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Raw answer from the name authority, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorityReply {
    pub status: u16,
    pub body: String,
}

impl AuthorityReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// External taxonomic name registry.
///
/// One call per name, blocking. `Err` carries a transport failure
/// (connection refused, timeout, unreadable body); every HTTP status,
/// including errors, comes back as `Ok`.
pub trait NameAuthority {
    fn search(&self, key: &str) -> Result<AuthorityReply, String>;
}

impl<A: NameAuthority + ?Sized> NameAuthority for &A {
    fn search(&self, key: &str) -> Result<AuthorityReply, String> {
        (**self).search(key)
    }
}

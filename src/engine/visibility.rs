use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "public" => Some(Visibility::Public),
            "protected" => Some(Visibility::Protected),
            "private" => Some(Visibility::Private),
            _ => None,
        }
    }
}

/// Set of visibilities to document, parsed leniently from the
/// comma-separated configuration string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibilityFilter {
    allowed: Vec<Visibility>,
}

impl VisibilityFilter {
    /// Unknown tokens are skipped with a warning; blanks are ignored.
    pub fn parse(spec: &str) -> Self {
        let mut allowed = Vec::new();

        for token in spec.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            match Visibility::from_str(token) {
                Some(v) if !allowed.contains(&v) => allowed.push(v),
                Some(_) => {}
                None => warn!("Ignoring unknown visibility '{}'", token),
            }
        }

        Self { allowed }
    }

    pub fn allows(&self, visibility: Visibility) -> bool {
        self.allowed.contains(&visibility)
    }

    pub fn allowed(&self) -> &[Visibility] {
        &self.allowed
    }

    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }
}

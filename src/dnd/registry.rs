/// Named indicator templates, keyed by an optional drag-type tag.
///
/// `None` is the default key: a drag whose type has no dedicated template falls back to
/// it. Registering the same key twice is a setup programming mistake and fails
/// immediately rather than silently replacing the template.
#[derive(Debug, Default)]
pub(super) struct TemplateRegistry {
    templates: ahash::HashMap<Option<String>, String>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum TemplateRegistryError {
    Duplicate { key: Option<String> },
}

impl std::fmt::Display for TemplateRegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Duplicate { key: Some(key) } => {
                write!(f, "an indicator template for type {key:?} is already registered")
            }
            Self::Duplicate { key: None } => {
                write!(f, "a default indicator template is already registered")
            }
        }
    }
}

impl std::error::Error for TemplateRegistryError {}

impl TemplateRegistry {
    pub(super) fn register(
        &mut self,
        markup: impl Into<String>,
        drag_type: Option<&str>,
    ) -> Result<(), TemplateRegistryError> {
        let key = drag_type.map(str::to_owned);
        if self.templates.contains_key(&key) {
            return Err(TemplateRegistryError::Duplicate { key });
        }
        self.templates.insert(key, markup.into());
        Ok(())
    }

    /// Exact-tag lookup with fallback to the default template.
    pub(super) fn lookup(&self, drag_type: Option<&str>) -> Option<&str> {
        let exact = drag_type.and_then(|t| self.templates.get(&Some(t.to_owned())));
        exact
            .or_else(|| self.templates.get(&None))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_registration_is_an_error() {
        let mut reg = TemplateRegistry::default();
        reg.register("<div/>", Some("card")).expect("first registration");
        assert_eq!(
            reg.register("<span/>", Some("card")),
            Err(TemplateRegistryError::Duplicate {
                key: Some("card".to_owned())
            })
        );
        assert_eq!(
            reg.register("<div/>", None).and(reg.register("<div/>", None)),
            Err(TemplateRegistryError::Duplicate { key: None })
        );
    }

    #[test]
    fn lookup_prefers_exact_tag_then_default() {
        let mut reg = TemplateRegistry::default();
        reg.register("<default/>", None).expect("register default");
        reg.register("<card/>", Some("card")).expect("register card");

        assert_eq!(reg.lookup(Some("card")), Some("<card/>"));
        assert_eq!(reg.lookup(Some("file")), Some("<default/>"));
        assert_eq!(reg.lookup(None), Some("<default/>"));
    }

    #[test]
    fn lookup_without_templates_is_none() {
        let reg = TemplateRegistry::default();
        assert_eq!(reg.lookup(Some("card")), None);
        assert_eq!(reg.lookup(None), None);
    }
}

//! Literal placeholder substitution
//!
//! Templates are plain text with `{{ token }}` markers from a fixed
//! vocabulary. Substitution is a single left-to-right pass: inserted values
//! are never scanned again, and any marker that is not bound (including
//! markers outside the vocabulary, like `{{ item.id }}` in Vue markup) is
//! copied through unchanged.

use std::collections::BTreeMap;

/// Option group a placeholder belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceholderGroup {
    /// Model and controller naming
    Naming,
    /// Layout component name
    Layout,
    /// Controller validation rules
    ValidationRules,
    /// List view table cells
    Table,
    /// Form view controls
    FormFields,
    /// Eager-loaded relation names
    Relations,
}

/// Template variable vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Placeholder {
    /// `{{ namespace }}`
    Namespace,
    /// `{{ Model }}`
    Model,
    /// `{{ model }}`
    ModelVariable,
    /// `{{ models }}`
    CollectionVariable,
    /// `{{ controllerClass }}`
    ControllerClass,
    /// `{{ Controller }}`
    ControllerReference,
    /// `{{ layoutName }}`
    LayoutName,
    /// `{{ validRules }}`
    ValidationRules,
    /// `{{ th }}`
    TableHead,
    /// `{{ td }}`
    TableData,
    /// `{{ fields }}`
    FormFields,
    /// `{{ relations }}`
    Relations,
}

impl Placeholder {
    /// Every placeholder, in declaration order
    pub const ALL: [Self; 12] = [
        Self::Namespace,
        Self::Model,
        Self::ModelVariable,
        Self::CollectionVariable,
        Self::ControllerClass,
        Self::ControllerReference,
        Self::LayoutName,
        Self::ValidationRules,
        Self::TableHead,
        Self::TableData,
        Self::FormFields,
        Self::Relations,
    ];

    /// The literal marker as it appears in templates
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Namespace => "{{ namespace }}",
            Self::Model => "{{ Model }}",
            Self::ModelVariable => "{{ model }}",
            Self::CollectionVariable => "{{ models }}",
            Self::ControllerClass => "{{ controllerClass }}",
            Self::ControllerReference => "{{ Controller }}",
            Self::LayoutName => "{{ layoutName }}",
            Self::ValidationRules => "{{ validRules }}",
            Self::TableHead => "{{ th }}",
            Self::TableData => "{{ td }}",
            Self::FormFields => "{{ fields }}",
            Self::Relations => "{{ relations }}",
        }
    }

    /// Option group controlling this placeholder
    #[must_use]
    pub const fn group(self) -> PlaceholderGroup {
        match self {
            Self::Namespace
            | Self::Model
            | Self::ModelVariable
            | Self::CollectionVariable
            | Self::ControllerClass
            | Self::ControllerReference => PlaceholderGroup::Naming,
            Self::LayoutName => PlaceholderGroup::Layout,
            Self::ValidationRules => PlaceholderGroup::ValidationRules,
            Self::TableHead | Self::TableData => PlaceholderGroup::Table,
            Self::FormFields => PlaceholderGroup::FormFields,
            Self::Relations => PlaceholderGroup::Relations,
        }
    }

    /// Placeholders in `group`
    pub fn in_group(group: PlaceholderGroup) -> impl Iterator<Item = Self> {
        Self::ALL.into_iter().filter(move |p| p.group() == group)
    }
}

/// Values bound to a subset of the vocabulary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitutions {
    values: BTreeMap<Placeholder, String>,
}

impl Substitutions {
    /// No bindings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `placeholder` to `value`, replacing any previous binding
    pub fn bind(&mut self, placeholder: Placeholder, value: impl Into<String>) {
        self.values.insert(placeholder, value.into());
    }

    /// Builder form of [`bind`](Self::bind)
    #[must_use]
    pub fn with(mut self, placeholder: Placeholder, value: impl Into<String>) -> Self {
        self.bind(placeholder, value);
        self
    }

    /// Bound value of `placeholder`
    #[must_use]
    pub fn get(&self, placeholder: Placeholder) -> Option<&str> {
        self.values.get(&placeholder).map(String::as_str)
    }

    /// Whether `placeholder` is bound
    #[must_use]
    pub fn is_bound(&self, placeholder: Placeholder) -> bool {
        self.values.contains_key(&placeholder)
    }

    /// Substitute into `template`; see [`substitute`]
    #[must_use]
    pub fn apply(&self, template: &str) -> String {
        substitute(template, self)
    }
}

/// Replace every bound marker in `template` in one left-to-right pass
///
/// # Examples
///
/// ```
/// # use vilt_scaffold::scaffold::{substitute, Placeholder, Substitutions};
/// let subs = Substitutions::new().with(Placeholder::Model, "Post");
/// assert_eq!(
///     substitute("class {{ Model }} {{ item.id }}", &subs),
///     "class Post {{ item.id }}"
/// );
/// ```
#[must_use]
pub fn substitute(template: &str, subs: &Substitutions) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        output.push_str(&rest[..start]);
        rest = &rest[start..];

        let matched = subs
            .values
            .iter()
            .find(|(placeholder, _)| rest.starts_with(placeholder.token()));

        match matched {
            Some((placeholder, value)) => {
                output.push_str(value);
                rest = &rest[placeholder.token().len()..];
            }
            None => {
                output.push('{');
                rest = &rest[1..];
            }
        }
    }

    output.push_str(rest);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replaces_every_occurrence() {
        let subs = Substitutions::new().with(Placeholder::CollectionVariable, "posts");
        assert_eq!(
            subs.apply("{{ models }}.index / {{ models }}.create"),
            "posts.index / posts.create"
        );
    }

    #[test]
    fn test_unbound_tokens_stay_verbatim() {
        let subs = Substitutions::new().with(Placeholder::Model, "Post");
        assert_eq!(subs.apply("{{ Model }} {{ th }}"), "Post {{ th }}");
    }

    #[test]
    fn test_unknown_tokens_stay_verbatim() {
        let subs = Substitutions::new().with(Placeholder::ModelVariable, "post");
        assert_eq!(
            subs.apply("<p>{{ item.id }}</p><p>{{ model }}</p>{{"),
            "<p>{{ item.id }}</p><p>post</p>{{"
        );
    }

    #[test]
    fn test_inserted_values_are_not_rescanned() {
        let subs = Substitutions::new()
            .with(Placeholder::Model, "{{ model }}")
            .with(Placeholder::ModelVariable, "post");
        assert_eq!(subs.apply("{{ Model }}|{{ model }}"), "{{ model }}|post");
    }

    #[test]
    fn test_case_sensitive_tokens() {
        let subs = Substitutions::new()
            .with(Placeholder::ControllerClass, "PostController")
            .with(Placeholder::ControllerReference, "App\\Http\\Controllers\\PostController");
        assert_eq!(
            subs.apply("{{ controllerClass }} {{ Controller }}"),
            "PostController App\\Http\\Controllers\\PostController"
        );
    }

    #[test]
    fn test_adjacent_braces() {
        let subs = Substitutions::new().with(Placeholder::Model, "Post");
        assert_eq!(subs.apply("{{{ Model }}}"), "{Post}");
    }

    #[test]
    fn test_multibyte_text_is_preserved() {
        let subs = Substitutions::new().with(Placeholder::Model, "Beitrag");
        assert_eq!(subs.apply("Übersicht: {{ Model }} ✓"), "Übersicht: Beitrag ✓");
    }

    #[test]
    fn test_groups() {
        let table: Vec<_> = Placeholder::in_group(PlaceholderGroup::Table).collect();
        assert_eq!(table, vec![Placeholder::TableHead, Placeholder::TableData]);
        assert_eq!(Placeholder::in_group(PlaceholderGroup::Naming).count(), 6);
        assert_eq!(Placeholder::LayoutName.group(), PlaceholderGroup::Layout);
    }

    #[test]
    fn test_rebinding_replaces_value() {
        let mut subs = Substitutions::new();
        subs.bind(Placeholder::LayoutName, "AppLayout");
        subs.bind(Placeholder::LayoutName, "AdminLayout");
        assert_eq!(subs.get(Placeholder::LayoutName), Some("AdminLayout"));
        assert!(!subs.is_bound(Placeholder::Relations));
    }
}

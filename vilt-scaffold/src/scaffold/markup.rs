//! Markup fragments derived from field descriptors

use std::fmt::Write as _;

use crate::schema::{FieldDescriptor, Relation};

/// Catalog types rendered as multi-line text
const TEXT_FAMILY: [&str; 4] = ["text", "tinytext", "mediumtext", "longtext"];

/// Form control chosen for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    /// `<input type="date">`
    Date,
    /// `<input type="email">`
    Email,
    /// `<input type="password">`
    Password,
    /// `<textarea>`
    TextArea,
    /// `<input type="text">`
    Text,
}

impl ControlKind {
    /// Classify a field by name alone
    ///
    /// Checks run in order, first match wins: `date`, `email`, `password`,
    /// then `description` / `content` / `text`. Matching is case-sensitive.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vilt_scaffold::scaffold::markup::ControlKind;
    /// assert_eq!(ControlKind::classify("published_date"), ControlKind::Date);
    /// assert_eq!(ControlKind::classify("email_date"), ControlKind::Date);
    /// assert_eq!(ControlKind::classify("title"), ControlKind::Text);
    /// ```
    #[must_use]
    pub fn classify(name: &str) -> Self {
        if name.contains("date") {
            Self::Date
        } else if name.contains("email") {
            Self::Email
        } else if name.contains("password") {
            Self::Password
        } else if ["description", "content", "text"]
            .iter()
            .any(|word| name.contains(word))
        {
            Self::TextArea
        } else {
            Self::Text
        }
    }

    /// Classify a field by name, falling back to its catalog type
    ///
    /// A name that only yields [`ControlKind::Text`] becomes a text area when
    /// the column is of a text-family type (`text`, `longtext`, ...).
    #[must_use]
    pub fn for_field(field: &FieldDescriptor) -> Self {
        match Self::classify(&field.name) {
            Self::Text if !field.is_foreign_key && is_text_family(&field.field_type) => {
                Self::TextArea
            }
            kind => kind,
        }
    }

    /// `type` attribute of an `<input>`; `None` for a text area
    #[must_use]
    pub const fn input_type(self) -> Option<&'static str> {
        match self {
            Self::Date => Some("date"),
            Self::Email => Some("email"),
            Self::Password => Some("password"),
            Self::Text => Some("text"),
            Self::TextArea => None,
        }
    }
}

fn is_text_family(field_type: &str) -> bool {
    TEXT_FAMILY.contains(&field_type.to_ascii_lowercase().as_str())
}

fn scaffolded(fields: &[FieldDescriptor]) -> impl Iterator<Item = &FieldDescriptor> {
    fields.iter().filter(|field| !field.is_implicit())
}

/// Controller validation rule lines, one per non-key field
///
/// # Examples
///
/// ```
/// # use vilt_scaffold::schema::{CatalogColumn, FieldDescriptor};
/// # use vilt_scaffold::scaffold::markup::validation_rules;
/// let fields = [FieldDescriptor::from_column(&CatalogColumn::new("title", "varchar"))];
/// assert_eq!(validation_rules(&fields), "'title' => ['required'],\n");
/// ```
#[must_use]
pub fn validation_rules(fields: &[FieldDescriptor]) -> String {
    scaffolded(fields)
        .filter(|field| !field.is_primary_key)
        .fold(String::new(), |mut out, field| {
            let _ = writeln!(out, "'{}' => ['required'],", field.name);
            out
        })
}

/// List view header cells
#[must_use]
pub fn table_head(fields: &[FieldDescriptor]) -> String {
    scaffolded(fields).fold(String::new(), |mut out, field| {
        let _ = writeln!(out, "<th class='border border-gray-300 p-2'>{}</th>", field.name);
        out
    })
}

/// List view data cells bound to the row variable `item`
#[must_use]
pub fn table_data(fields: &[FieldDescriptor]) -> String {
    scaffolded(fields).fold(String::new(), |mut out, field| {
        let _ = writeln!(
            out,
            "<td class='border border-gray-300 p-2'>{{{{item.{}}}}}</td>",
            field.name
        );
        out
    })
}

/// One form control bound to `form.{name}`
///
/// # Examples
///
/// ```
/// # use vilt_scaffold::scaffold::markup::{form_control, ControlKind};
/// assert_eq!(
///     form_control("email", ControlKind::Email),
///     "<input type=\"email\" v-model=\"form.email\" placeholder=\"Enter email\" />\n"
/// );
/// ```
#[must_use]
pub fn form_control(name: &str, kind: ControlKind) -> String {
    kind.input_type().map_or_else(
        || format!("<textarea v-model=\"form.{name}\" placeholder=\"Enter {name}\"></textarea>\n"),
        |input_type| {
            format!(
                "<input type=\"{input_type}\" v-model=\"form.{name}\" placeholder=\"Enter {name}\" />\n"
            )
        },
    )
}

/// Form controls for every scaffolded field
#[must_use]
pub fn form_fields(fields: &[FieldDescriptor]) -> String {
    scaffolded(fields)
        .map(|field| form_control(&field.name, ControlKind::for_field(field)))
        .collect()
}

/// Quoted, comma-separated relation names (`'author', 'comments'`)
#[must_use]
pub fn relation_list(relations: &[Relation]) -> String {
    relations
        .iter()
        .map(|relation| format!("'{}'", relation.name))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{CatalogColumn, RelationKind};
    use proptest::prelude::*;

    fn field(name: &str, data_type: &str) -> FieldDescriptor {
        FieldDescriptor::from_column(&CatalogColumn::new(name, data_type))
    }

    #[test]
    fn test_classify_order() {
        assert_eq!(ControlKind::classify("birth_date"), ControlKind::Date);
        assert_eq!(ControlKind::classify("contact_email"), ControlKind::Email);
        assert_eq!(ControlKind::classify("password_hash"), ControlKind::Password);
        assert_eq!(ControlKind::classify("description"), ControlKind::TextArea);
        assert_eq!(ControlKind::classify("content"), ControlKind::TextArea);
        assert_eq!(ControlKind::classify("subtext"), ControlKind::TextArea);
        assert_eq!(ControlKind::classify("updated_email"), ControlKind::Date);
        assert_eq!(ControlKind::classify("title"), ControlKind::Text);
        assert_eq!(ControlKind::classify("body"), ControlKind::Text);
    }

    #[test]
    fn test_classify_is_case_sensitive() {
        assert_eq!(ControlKind::classify("Email"), ControlKind::Text);
        assert_eq!(ControlKind::classify("BirthDate"), ControlKind::Text);
        assert_eq!(ControlKind::classify("Password"), ControlKind::Text);
        assert_eq!(ControlKind::classify("work_Email"), ControlKind::Text);
        assert_eq!(ControlKind::classify("Email_date"), ControlKind::Date);
    }

    #[test]
    fn test_for_field_uses_text_type() {
        assert_eq!(ControlKind::for_field(&field("body", "text")), ControlKind::TextArea);
        assert_eq!(ControlKind::for_field(&field("notes", "LONGTEXT")), ControlKind::TextArea);
        assert_eq!(ControlKind::for_field(&field("title", "varchar")), ControlKind::Text);
        // A name match always wins over the type
        assert_eq!(ControlKind::for_field(&field("signup_date", "text")), ControlKind::Date);
        assert_eq!(ControlKind::for_field(&field("author_id", "text")), ControlKind::Text);
    }

    #[test]
    fn test_validation_rules_skip_keys_and_implicit_fields() {
        let mut uuid = field("uuid", "char");
        uuid.is_primary_key = true;

        let fields = vec![uuid, field("id", "bigint"), field("title", "varchar"), field("body", "text")];
        assert_eq!(
            validation_rules(&fields),
            "'title' => ['required'],\n'body' => ['required'],\n"
        );
    }

    #[test]
    fn test_table_cells() {
        let fields = vec![field("title", "varchar"), field("author_id", "bigint")];
        assert_eq!(
            table_head(&fields),
            "<th class='border border-gray-300 p-2'>title</th>\n\
             <th class='border border-gray-300 p-2'>author_id</th>\n"
        );
        assert_eq!(
            table_data(&fields),
            "<td class='border border-gray-300 p-2'>{{item.title}}</td>\n\
             <td class='border border-gray-300 p-2'>{{item.author_id}}</td>\n"
        );
    }

    #[test]
    fn test_form_fields() {
        let fields = vec![field("title", "varchar"), field("body", "text"), field("author_id", "bigint")];
        assert_eq!(
            form_fields(&fields),
            "<input type=\"text\" v-model=\"form.title\" placeholder=\"Enter title\" />\n\
             <textarea v-model=\"form.body\" placeholder=\"Enter body\"></textarea>\n\
             <input type=\"text\" v-model=\"form.author_id\" placeholder=\"Enter author_id\" />\n"
        );
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(validation_rules(&[]), "");
        assert_eq!(table_head(&[]), "");
        assert_eq!(form_fields(&[]), "");
        assert_eq!(relation_list(&[]), "");
    }

    #[test]
    fn test_relation_list() {
        let relations = vec![
            Relation::new("author", RelationKind::BelongsTo),
            Relation::new("comments", RelationKind::HasMany),
        ];
        assert_eq!(relation_list(&relations), "'author', 'comments'");
    }

    proptest! {
        #[test]
        fn prop_email_without_date_is_email(
            prefix in "[a-c_]{0,6}",
            suffix in "[a-c_]{0,6}",
        ) {
            let name = format!("{prefix}email{suffix}");
            prop_assert_eq!(ControlKind::classify(&name), ControlKind::Email);
        }

        #[test]
        fn prop_date_always_wins(prefix in "[a-z_]{0,8}", suffix in "[a-z_]{0,8}") {
            let name = format!("{prefix}date{suffix}");
            prop_assert_eq!(ControlKind::classify(&name), ControlKind::Date);
        }
    }
}

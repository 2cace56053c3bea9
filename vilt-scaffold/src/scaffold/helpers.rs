//! Naming helpers for code generation
//!
//! Derives the model-dependent names used by the templates: table names,
//! view variables, route segments and controller class names.

use inflector::Inflector;

/// Naming conventions applied to a model name
pub struct NameHelpers;

impl NameHelpers {
    /// Lower-cased model name, used as the view variable (`{{ model }}`)
    ///
    /// # Examples
    ///
    /// ```
    /// # use vilt_scaffold::scaffold::helpers::NameHelpers;
    /// assert_eq!(NameHelpers::model_variable("Post"), "post");
    /// assert_eq!(NameHelpers::model_variable("BlogPost"), "blogpost");
    /// ```
    #[must_use]
    pub fn model_variable(model: &str) -> String {
        model.to_lowercase()
    }

    /// Lower-cased plural, used as route segment and list variable (`{{ models }}`)
    ///
    /// # Examples
    ///
    /// ```
    /// # use vilt_scaffold::scaffold::helpers::NameHelpers;
    /// assert_eq!(NameHelpers::collection_variable("Post"), "posts");
    /// assert_eq!(NameHelpers::collection_variable("Category"), "categories");
    /// ```
    ///
    /// # Note
    ///
    /// The inflector library has known limitations with some irregular plurals.
    #[must_use]
    pub fn collection_variable(model: &str) -> String {
        Self::model_variable(model).to_plural()
    }

    /// Convert a model name to its default table name (`snake_case` plural)
    ///
    /// # Examples
    ///
    /// ```
    /// # use vilt_scaffold::scaffold::helpers::NameHelpers;
    /// assert_eq!(NameHelpers::table_name("Post"), "posts");
    /// assert_eq!(NameHelpers::table_name("UserProfile"), "user_profiles");
    /// assert_eq!(NameHelpers::table_name("Category"), "categories");
    /// ```
    #[must_use]
    pub fn table_name(model: &str) -> String {
        model.to_snake_case().to_plural()
    }

    /// Unqualified controller class name
    ///
    /// # Examples
    ///
    /// ```
    /// # use vilt_scaffold::scaffold::helpers::NameHelpers;
    /// assert_eq!(NameHelpers::controller_class("Post"), "PostController");
    /// ```
    #[must_use]
    pub fn controller_class(model: &str) -> String {
        format!("{model}Controller")
    }

    /// Controller class name qualified with `namespace`
    ///
    /// # Examples
    ///
    /// ```
    /// # use vilt_scaffold::scaffold::helpers::NameHelpers;
    /// assert_eq!(
    ///     NameHelpers::controller_reference("App\\Http\\Controllers", "Post"),
    ///     "App\\Http\\Controllers\\PostController"
    /// );
    /// ```
    #[must_use]
    pub fn controller_reference(namespace: &str, model: &str) -> String {
        let namespace = namespace.trim_end_matches('\\');
        if namespace.is_empty() {
            Self::controller_class(model)
        } else {
            format!("{namespace}\\{}", Self::controller_class(model))
        }
    }
}

//! Template sets: user overrides with a bundled fallback
//!
//! A template set is a directory of `.stub` files. The set named by
//! `stub_template` is looked up under the override root first
//! (`{stubs_dir}/{set}/{file}`); the `default` set is also compiled into the
//! binary and serves any file the override root lacks.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, ScaffoldError};

/// Name of the set compiled into the binary
pub const BUNDLED_SET: &str = "default";

/// One template of a set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Template {
    /// Resource controller
    Controller,
    /// Route registration line
    Route,
    /// List page
    ListView,
    /// Detail page
    DetailView,
    /// Create / edit page
    FormView,
}

impl Template {
    /// Generation order
    pub const EMISSION_ORDER: [Self; 5] = [
        Self::Controller,
        Self::Route,
        Self::ListView,
        Self::FormView,
        Self::DetailView,
    ];

    /// Template file name within a set
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Controller => "controller.stub",
            Self::Route => "route.stub",
            Self::ListView => "vue-index.stub",
            Self::DetailView => "vue-show.stub",
            Self::FormView => "vue-form.stub",
        }
    }

    /// Short label for progress output
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Controller => "controller",
            Self::Route => "route",
            Self::ListView => "list view",
            Self::DetailView => "detail view",
            Self::FormView => "form view",
        }
    }

    /// Content of the bundled `default` set
    #[must_use]
    pub const fn bundled(self) -> &'static str {
        match self {
            Self::Controller => include_str!("../../stubs/default/controller.stub"),
            Self::Route => include_str!("../../stubs/default/route.stub"),
            Self::ListView => include_str!("../../stubs/default/vue-index.stub"),
            Self::DetailView => include_str!("../../stubs/default/vue-show.stub"),
            Self::FormView => include_str!("../../stubs/default/vue-form.stub"),
        }
    }
}

/// Where a template was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// File under the override root
    Override(PathBuf),
    /// Compiled-in copy
    Bundled,
}

/// File written or kept by [`TemplateSet::publish`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// Stub was written
    Written(PathBuf),
    /// Stub already existed and was left alone
    Kept(PathBuf),
}

impl PublishOutcome {
    /// Path of the stub
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Written(path) | Self::Kept(path) => path,
        }
    }
}

/// A named template set with its override root
#[derive(Debug, Clone)]
pub struct TemplateSet {
    override_root: PathBuf,
    name: String,
}

impl TemplateSet {
    /// Template set `name` looked up under `override_root`
    pub fn new(override_root: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            override_root: override_root.into(),
            name: name.into(),
        }
    }

    /// Override location of `template`
    #[must_use]
    pub fn override_path(&self, template: Template) -> PathBuf {
        self.override_root.join(&self.name).join(template.file_name())
    }

    /// Which root serves `template`
    pub fn source(&self, template: Template) -> Result<TemplateSource> {
        let path = self.override_path(template);
        if path.is_file() {
            Ok(TemplateSource::Override(path))
        } else if self.name == BUNDLED_SET {
            Ok(TemplateSource::Bundled)
        } else {
            Err(ScaffoldError::TemplateNotFound {
                set: self.name.clone(),
                file: template.file_name().to_string(),
            })
        }
    }

    /// Content of `template`
    pub fn load(&self, template: Template) -> Result<String> {
        match self.source(template)? {
            TemplateSource::Override(path) => {
                tracing::debug!(template = %path.display(), "using override template");
                fs::read_to_string(&path).map_err(|source| ScaffoldError::Io { path, source })
            }
            TemplateSource::Bundled => Ok(template.bundled().to_string()),
        }
    }

    /// Copy the bundled stubs to `{dest_root}/default/`
    ///
    /// Existing files are kept unless `force` is set.
    pub fn publish(dest_root: &Path, force: bool) -> Result<Vec<PublishOutcome>> {
        let dir = dest_root.join(BUNDLED_SET);
        fs::create_dir_all(&dir).map_err(|source| ScaffoldError::OutputPathUnwritable {
            path: dir.clone(),
            source,
        })?;

        let mut outcomes = Vec::with_capacity(Template::EMISSION_ORDER.len());
        for template in Template::EMISSION_ORDER {
            let path = dir.join(template.file_name());
            if path.exists() && !force {
                outcomes.push(PublishOutcome::Kept(path));
                continue;
            }

            fs::write(&path, template.bundled()).map_err(|source| {
                ScaffoldError::OutputPathUnwritable {
                    path: path.clone(),
                    source,
                }
            })?;
            outcomes.push(PublishOutcome::Written(path));
        }

        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_bundled_stubs_carry_placeholders() {
        assert!(Template::Controller.bundled().contains("{{ validRules }}"));
        assert!(Template::Controller.bundled().contains("{{ relations }}"));
        assert!(Template::Route.bundled().contains("{{ Controller }}"));
        assert!(Template::ListView.bundled().contains("{{ th }}"));
        assert!(Template::ListView.bundled().contains("{{ td }}"));
        assert!(Template::FormView.bundled().contains("{{ fields }}"));
        assert!(Template::DetailView.bundled().contains("{{ layoutName }}"));
    }

    #[test]
    fn test_default_set_falls_back_to_bundled() {
        let dir = TempDir::new().unwrap();
        let set = TemplateSet::new(dir.path(), BUNDLED_SET);
        assert_eq!(set.source(Template::Route).unwrap(), TemplateSource::Bundled);
        assert_eq!(set.load(Template::Route).unwrap(), Template::Route.bundled());
    }

    #[test]
    fn test_override_wins() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("default")).unwrap();
        fs::write(dir.path().join("default/route.stub"), "custom {{ models }}\n").unwrap();

        let set = TemplateSet::new(dir.path(), "default");
        assert!(matches!(
            set.source(Template::Route).unwrap(),
            TemplateSource::Override(_)
        ));
        assert_eq!(set.load(Template::Route).unwrap(), "custom {{ models }}\n");
        // Files absent from the override root still come from the bundle
        assert_eq!(set.source(Template::Controller).unwrap(), TemplateSource::Bundled);
    }

    #[test]
    fn test_unknown_set_without_files() {
        let dir = TempDir::new().unwrap();
        let set = TemplateSet::new(dir.path(), "tailwind");
        let err = set.load(Template::FormView).unwrap_err();
        assert!(matches!(
            err,
            ScaffoldError::TemplateNotFound { ref set, ref file }
                if set == "tailwind" && file == "vue-form.stub"
        ));
    }

    #[test]
    fn test_publish_keeps_existing_files() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("default")).unwrap();
        fs::write(dir.path().join("default/route.stub"), "mine\n").unwrap();

        let outcomes = TemplateSet::publish(dir.path(), false).unwrap();
        assert_eq!(outcomes.len(), 5);
        assert!(outcomes
            .iter()
            .any(|o| matches!(o, PublishOutcome::Kept(p) if p.ends_with("route.stub"))));
        assert_eq!(
            fs::read_to_string(dir.path().join("default/route.stub")).unwrap(),
            "mine\n"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("default/controller.stub")).unwrap(),
            Template::Controller.bundled()
        );

        TemplateSet::publish(dir.path(), true).unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("default/route.stub")).unwrap(),
            Template::Route.bundled()
        );
    }
}

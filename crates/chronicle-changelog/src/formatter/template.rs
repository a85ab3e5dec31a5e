//! Template-based release formatter

use std::collections::BTreeMap;
use std::fs;

use minijinja::{context, Environment};
use serde::Serialize;
use tracing::{debug, instrument};

use chronicle_core::config::ChangelogConfig;
use chronicle_core::error::ChangelogError;
use chronicle_core::Result;

use super::transform::{CommitTransform, CommitView, DisplayTransform, NoteView};
use super::{ReleaseContext, ReleaseFormatter};
use crate::types::Commit;

/// Name the release template is registered under
const TEMPLATE_NAME: &str = "release.md";

/// Compare link used when none is configured
pub const DEFAULT_COMPARE_URL: &str = "{{ repo_url }}/compare/{{ previous_tag }}...{{ current_tag }}";

/// Built-in release template
pub const DEFAULT_TEMPLATE: &str = r#"## {% if compare_url %}[{{ version }}]({{ compare_url }}){% else %}{{ version }}{% endif %}{% if date %} ({{ date }}){% endif %}

{% for group in commit_groups -%}
{% if group.title -%}
### {{ group.title }}

{% endif -%}
{% for commit in group.commits -%}
* {% if commit.scope %}**{{ commit.scope }}:** {% endif %}{{ commit.subject }}{% if commit.hash %} ({% if repo_url %}[{{ commit.hash }}]({{ repo_url }}/commit/{{ commit.full_hash }}){% else %}{{ commit.hash }}{% endif %}){% endif %}{% if commit.references %}, closes{% for reference in commit.references %} {% if repo_url and not reference.owner %}[{{ reference.label }}]({{ repo_url }}/issues/{{ reference.issue }}){% else %}{{ reference.label }}{% endif %}{% endfor %}{% endif %}
{% endfor %}
{% endfor -%}
{% for group in note_groups -%}
### {{ group.title }}

{% for note in group.notes -%}
* {% if note.scope %}**{{ note.scope }}:** {% endif %}{{ note.text }}
{% endfor %}
{% endfor -%}
"#;

#[derive(Debug, Serialize)]
struct CommitGroup {
    title: Option<String>,
    commits: Vec<CommitView>,
}

#[derive(Debug, Serialize)]
struct NoteGroup {
    title: String,
    notes: Vec<NoteView>,
}

#[derive(Debug, Serialize)]
struct TemplateContext<'a> {
    version: &'a str,
    date: Option<&'a str>,
    repo_url: Option<&'a str>,
    compare_url: Option<String>,
    commit_groups: Vec<CommitGroup>,
    note_groups: Vec<NoteGroup>,
}

/// Renders releases with a MiniJinja template
///
/// The template receives `version`, `date`, `repo_url`, `compare_url`,
/// `commit_groups` (each with a `title` and its `commits`) and
/// `note_groups` (each with a `title` and its `notes`).
pub struct TemplateFormatter<T: CommitTransform = DisplayTransform> {
    env: Environment<'static>,
    transform: T,
    /// The compare link template reads `repo_url`
    compare_uses_repo_url: bool,
}

impl TemplateFormatter<DisplayTransform> {
    /// Create a formatter from the changelog configuration, loading the
    /// custom template when one is configured
    pub fn new(config: &ChangelogConfig) -> Result<Self> {
        let source = match &config.template {
            Some(path) => {
                debug!(path = %path.display(), "Loading release template");
                fs::read_to_string(path).map_err(|source| ChangelogError::TemplateRead {
                    path: path.clone(),
                    source,
                })?
            }
            None => DEFAULT_TEMPLATE.to_string(),
        };

        Self::with_template(
            source,
            config.compare_url.clone(),
            DisplayTransform::new(config),
        )
    }
}

impl<T: CommitTransform> TemplateFormatter<T> {
    /// Create a formatter from a template source, an optional compare link
    /// template and a commit transform
    pub fn with_template(
        source: impl Into<String>,
        compare_url: Option<String>,
        transform: T,
    ) -> Result<Self> {
        let compare_url = compare_url.unwrap_or_else(|| DEFAULT_COMPARE_URL.to_string());
        let compare_uses_repo_url = compare_url.contains("repo_url");

        let mut env = Environment::new();
        env.add_template_owned(TEMPLATE_NAME, source.into())
            .map_err(template_error)?;
        env.add_template_owned("compare_url", compare_url)
            .map_err(template_error)?;

        Ok(Self {
            env,
            transform,
            compare_uses_repo_url,
        })
    }

    /// Render the compare link, if the release has a predecessor to compare
    /// against. A template that reads `repo_url` needs one to be known;
    /// an absolute template does not.
    fn compare_url(&self, release: &ReleaseContext) -> Result<Option<String>> {
        let (Some(previous_tag), true) = (&release.previous_tag, release.link_compare) else {
            return Ok(None);
        };
        let repo_url = release.repo_url.as_deref().map(|u| u.trim_end_matches('/'));
        if repo_url.is_none() && self.compare_uses_repo_url {
            return Ok(None);
        }

        let url = self
            .env
            .get_template("compare_url")
            .and_then(|t| {
                t.render(context! {
                    repo_url => repo_url,
                    previous_tag => previous_tag,
                    current_tag => &release.current_tag,
                })
            })
            .map_err(template_error)?;

        Ok(Some(url.trim().to_string()))
    }
}

impl<T: CommitTransform> ReleaseFormatter for TemplateFormatter<T> {
    #[instrument(skip(self, commits), fields(version = %release.version, commits = commits.len()))]
    fn format(&self, commits: &[Commit], release: &ReleaseContext) -> Result<String> {
        let views: Vec<CommitView> = commits.iter().map(|c| self.transform.transform(c)).collect();

        let ctx = TemplateContext {
            version: &release.version,
            date: release.date.as_deref(),
            repo_url: release.repo_url.as_deref().map(|u| u.trim_end_matches('/')),
            compare_url: self.compare_url(release)?,
            note_groups: note_groups(&views),
            commit_groups: commit_groups(views),
        };

        let rendered = self
            .env
            .get_template(TEMPLATE_NAME)
            .and_then(|t| t.render(&ctx))
            .map_err(template_error)?;

        Ok(format!("{}\n\n", rendered.trim_end()))
    }
}

/// Group commits by type label, sorted by title. Commits without a type
/// come last. Order within a group is kept.
fn commit_groups(views: Vec<CommitView>) -> Vec<CommitGroup> {
    let mut titled: BTreeMap<String, Vec<CommitView>> = BTreeMap::new();
    let mut untitled = Vec::new();

    for view in views {
        match view.commit_type.clone() {
            Some(title) => titled.entry(title).or_default().push(view),
            None => untitled.push(view),
        }
    }

    let mut groups: Vec<CommitGroup> = titled
        .into_iter()
        .map(|(title, commits)| CommitGroup {
            title: Some(title),
            commits,
        })
        .collect();

    if !untitled.is_empty() {
        groups.push(CommitGroup {
            title: None,
            commits: untitled,
        });
    }

    groups
}

/// Group notes by title, sorted by title
fn note_groups(views: &[CommitView]) -> Vec<NoteGroup> {
    let mut groups: BTreeMap<String, Vec<NoteView>> = BTreeMap::new();

    for note in views.iter().flat_map(|v| &v.notes) {
        groups.entry(note.title.clone()).or_default().push(note.clone());
    }

    groups
        .into_iter()
        .map(|(title, notes)| NoteGroup { title, notes })
        .collect()
}

fn template_error(e: minijinja::Error) -> ChangelogError {
    ChangelogError::TemplateFailed(e.to_string())
}

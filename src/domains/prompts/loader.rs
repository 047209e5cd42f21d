//! Prompt loader - reads YAML prompt files from disk.
//!
//! Every `.yaml`/`.yml` file under the prompts root (recursively) holds exactly
//! one prompt. A single bad file, or two files sharing an id, fails the whole
//! load so a partial prompt set is never served.

use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

use super::error::{LibraryError, LoadError};
use super::library::PromptLibrary;
use super::model::PromptDefinition;
use super::validator::validate;

/// Category used for prompts sitting directly in the prompts root.
pub const UNCATEGORIZED: &str = "uncategorized";

/// URI scheme for prompt resources.
pub const PROMPT_URI_SCHEME: &str = "prompt";

/// Loads and saves prompt files relative to a prompts root directory.
#[derive(Debug, Clone)]
pub struct PromptLoader {
    root: PathBuf,
}

impl PromptLoader {
    /// Create a loader for the given prompts root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The prompts root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load every prompt file under the root into a new library.
    pub fn load_all(&self) -> Result<PromptLibrary, LoadError> {
        let mut library = PromptLibrary::new();

        for path in self.list_prompt_files()? {
            let definition = self.load(&path)?;
            let id = definition.id().to_string();

            library.add(definition).map_err(|err| match err {
                LibraryError::DuplicateId(id) => LoadError::DuplicateId {
                    id,
                    path: path.clone(),
                },
                LibraryError::Invalid { source, .. } => LoadError::validation(&path, source),
            })?;
            debug!("Loaded prompt '{}' from {}", id, path.display());
        }

        info!(
            "Loaded {} prompts from {}",
            library.len(),
            self.root.display()
        );
        Ok(library)
    }

    /// Paths of all prompt files under the root, sorted by name.
    pub fn list_prompt_files(&self) -> Result<Vec<PathBuf>, LoadError> {
        if !self.root.is_dir() {
            return Err(LoadError::directory_not_found(&self.root));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry?;
            if entry.file_type().is_file() && is_prompt_file(entry.path()) {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }

    /// Load and validate a single prompt file.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<PromptDefinition, LoadError> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|e| LoadError::read(path, e))?;

        let mut definition: PromptDefinition =
            serde_yaml::from_str(&data).map_err(|e| LoadError::parse(path, e))?;
        validate(&definition).map_err(|e| LoadError::validation(path, e))?;

        definition.source = Some(path.to_path_buf());
        Ok(definition)
    }

    /// Validate a prompt and write it to `path`, creating parent directories.
    pub fn save(
        &self,
        definition: &PromptDefinition,
        path: impl AsRef<Path>,
    ) -> Result<(), LoadError> {
        let path = path.as_ref();
        validate(definition).map_err(|e| LoadError::validation(path, e))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| LoadError::write(parent, e))?;
        }

        let yaml = serde_yaml::to_string(definition).map_err(|source| LoadError::Serialize {
            id: definition.id().to_string(),
            source,
        })?;
        fs::write(path, yaml).map_err(|e| LoadError::write(path, e))?;

        info!("Saved prompt '{}' to {}", definition.id(), path.display());
        Ok(())
    }

    /// The category of a prompt file: its first directory below the root.
    ///
    /// Files directly in the root, or outside it, are [`UNCATEGORIZED`].
    /// `.` segments are ignored on both sides, so `./prompts` and `prompts`
    /// name the same root.
    pub fn category_from_path(&self, path: impl AsRef<Path>) -> String {
        let root = without_cur_dir(&self.root);
        let path = without_cur_dir(path.as_ref());
        let Ok(relative) = path.strip_prefix(&root) else {
            return UNCATEGORIZED.to_string();
        };

        let mut components = relative.components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(first)), Some(_)) => first.to_string_lossy().into_owned(),
            _ => UNCATEGORIZED.to_string(),
        }
    }

    /// `prompt://<category>/<file stem>` for a prompt file.
    pub fn uri_for(&self, path: impl AsRef<Path>) -> String {
        let path = path.as_ref();
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        format!(
            "{}://{}/{}",
            PROMPT_URI_SCHEME,
            self.category_from_path(path),
            stem
        )
    }
}

fn without_cur_dir(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Whether the path has a `.yaml` or `.yml` extension (any case).
pub fn is_prompt_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn prompt_yaml(id: &str) -> String {
        format!(
            r#"metadata:
  id: "{id}"
  name: "Test Prompt"
  description: "A test prompt"
  author: "test"
  created: "2025-08-27T10:00:00Z"
  modified: "2025-08-27T10:00:00Z"
  version: "1.0.0"
  tags:
    - "test"

arguments:
  - name: "name"
    description: "Test name"
    type: "string"
    required: true
  - name: "excited"
    description: "Add emphasis"
    type: "boolean"
    required: false
    default: false

prompt: |
  Hello {{{{name}}}}!
  Excited: {{{{excited}}}}

usage_stats:
  usage_count: 3
  last_used: "2025-08-27T10:00:00Z"
"#
        )
    }

    fn write(dir: &Path, relative: &str, contents: &str) -> PathBuf {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_prompt() {
        let temp_dir = TempDir::new().unwrap();
        let file = write(temp_dir.path(), "test.yaml", &prompt_yaml("test-prompt"));

        let loader = PromptLoader::new(temp_dir.path());
        let prompt = loader.load(&file).unwrap();

        assert_eq!(prompt.id(), "test-prompt");
        assert_eq!(prompt.metadata.name, "Test Prompt");
        assert_eq!(prompt.arguments.len(), 2);
        assert_eq!(prompt.arguments[0].name, "name");
        assert_eq!(prompt.template, "Hello {{name}}!\nExcited: {{excited}}\n");
        assert_eq!(prompt.usage_count(), 3);
        assert_eq!(prompt.source(), Some(file.as_path()));
    }

    #[test]
    fn test_load_all_recurses_and_filters_extensions() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "root.yaml", &prompt_yaml("root"));
        write(temp_dir.path(), "dev/review.yml", &prompt_yaml("review"));
        write(temp_dir.path(), "dev/deep/nested.YAML", &prompt_yaml("nested"));
        write(temp_dir.path(), "notes.txt", "not a prompt");

        let library = PromptLoader::new(temp_dir.path()).load_all().unwrap();
        assert_eq!(library.len(), 3);
        for id in ["root", "review", "nested"] {
            let prompt = library.get(id).unwrap();
            assert_eq!(prompt.id(), id);
            assert!(prompt.source().is_some());
        }
    }

    #[test]
    fn test_duplicate_ids_fail_the_load() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "a.yaml", &prompt_yaml("greet"));
        write(temp_dir.path(), "b.yaml", &prompt_yaml("greet"));

        let err = PromptLoader::new(temp_dir.path()).load_all().unwrap_err();
        match err {
            LoadError::DuplicateId { id, path } => {
                assert_eq!(id, "greet");
                assert!(path.ends_with("b.yaml"));
            }
            other => panic!("Expected duplicate id error, got {other}"),
        }
    }

    #[test]
    fn test_one_invalid_file_fails_the_load() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "good.yaml", &prompt_yaml("good"));
        let bad = prompt_yaml("bad").replace("Hello {{name}}!", "Hello!");
        write(temp_dir.path(), "bad.yaml", &bad);

        let err = PromptLoader::new(temp_dir.path()).load_all().unwrap_err();
        assert!(matches!(err, LoadError::Validation { .. }));
        assert!(err.to_string().contains("bad.yaml"));
    }

    #[test]
    fn test_malformed_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let file = write(temp_dir.path(), "broken.yaml", "metadata: [unclosed");

        let err = PromptLoader::new(temp_dir.path()).load(&file).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn test_unknown_argument_type_is_a_validation_error() {
        let temp_dir = TempDir::new().unwrap();
        let yaml = prompt_yaml("typed").replace("type: \"boolean\"", "type: \"date\"");
        let file = write(temp_dir.path(), "typed.yaml", &yaml);

        let err = PromptLoader::new(temp_dir.path()).load(&file).unwrap_err();
        assert!(matches!(err, LoadError::Validation { .. }));
        assert!(err.to_string().contains("invalid type 'date'"));
    }

    #[test]
    fn test_missing_directory() {
        let loader = PromptLoader::new("/nonexistent/prompts/12345");
        assert!(matches!(
            loader.load_all(),
            Err(LoadError::DirectoryNotFound(_))
        ));
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let original = write(temp_dir.path(), "original.yaml", &prompt_yaml("round"));
        let loader = PromptLoader::new(temp_dir.path());

        let first = loader.load(&original).unwrap();
        let copy = temp_dir.path().join("nested/dir/copy.yaml");
        loader.save(&first, &copy).unwrap();

        let second = loader.load(&copy).unwrap();
        assert_eq!(first, second);
        assert_ne!(first.source(), second.source());

        let saved = fs::read_to_string(&copy).unwrap();
        assert!(saved.contains("usage_stats:"));
        assert!(saved.contains("usage_count: 3"));
    }

    #[test]
    fn test_save_rejects_invalid_prompt() {
        let temp_dir = TempDir::new().unwrap();
        let loader = PromptLoader::new(temp_dir.path());
        let target = temp_dir.path().join("invalid.yaml");

        let err = loader.save(&PromptDefinition::default(), &target).unwrap_err();
        assert!(matches!(err, LoadError::Validation { .. }));
        assert!(!target.exists());
    }

    #[test]
    fn test_category_and_uri() {
        let loader = PromptLoader::new("/srv/prompts");

        assert_eq!(
            loader.category_from_path("/srv/prompts/dev/review.yaml"),
            "dev"
        );
        assert_eq!(
            loader.category_from_path("/srv/prompts/dev/deep/x.yaml"),
            "dev"
        );
        assert_eq!(
            loader.category_from_path("/srv/prompts/root.yaml"),
            UNCATEGORIZED
        );
        assert_eq!(
            loader.category_from_path("/elsewhere/file.yaml"),
            UNCATEGORIZED
        );

        assert_eq!(
            loader.uri_for("/srv/prompts/dev/review.yaml"),
            "prompt://dev/review"
        );
        assert_eq!(
            loader.uri_for("/srv/prompts/root.yml"),
            "prompt://uncategorized/root"
        );
    }

    #[test]
    fn test_category_ignores_current_dir_segments() {
        let dotted = PromptLoader::new("./prompts");
        assert_eq!(dotted.category_from_path("prompts/dev/a.yaml"), "dev");
        assert_eq!(dotted.category_from_path("./prompts/dev/a.yaml"), "dev");
        assert_eq!(dotted.category_from_path("prompts/a.yaml"), UNCATEGORIZED);

        let plain = PromptLoader::new("prompts");
        assert_eq!(plain.category_from_path("./prompts/dev/a.yaml"), "dev");
        assert_eq!(plain.category_from_path("prompts/./ops/b.yml"), "ops");
        assert_eq!(plain.uri_for("./prompts/dev/a.yaml"), "prompt://dev/a");
    }

    #[test]
    fn test_load_accepts_date_only_timestamps() {
        let temp_dir = TempDir::new().unwrap();
        let file = write(
            temp_dir.path(),
            "dated.yaml",
            "metadata:\n  id: dated\n  name: Dated\n  description: d\n  author: a\n  \
             created: 2025-08-27\n  modified: 2025-08-28 10:00:00\n  version: 1.0.0\n\
             prompt: static text\n",
        );

        let prompt = PromptLoader::new(temp_dir.path()).load(&file).unwrap();
        assert_eq!(
            prompt.metadata.created,
            Some("2025-08-27T00:00:00Z".parse().unwrap())
        );
        assert_eq!(
            prompt.metadata.modified,
            Some("2025-08-28T10:00:00Z".parse().unwrap())
        );
    }

    #[test]
    fn test_bundled_prompts_load() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("prompts");
        let library = PromptLoader::new(&root).load_all().unwrap();
        assert!(!library.is_empty());

        for id in library.ids() {
            assert_eq!(library.get(id).unwrap().id(), id);
        }
    }
}

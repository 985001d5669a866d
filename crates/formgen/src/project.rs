//! Project driver.
//!
//! Runs every form of a project through every requested language and hands the
//! output to a [`FileWriter`]. Each (form, language) pair is independent, so with
//! `parallel_collection` on the pairs are spread over the rayon pool. Results
//! come back in form order either way.

use indexmap::IndexSet;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use formgen_codegen::{FormGenerator, FormOutput, GenLang, GenResultCode, GenerationOptions};
use formgen_core::{AssetCache, DesignTree, NodeId};

use crate::error::Result;
use crate::writer::FileWriter;

/// What happened to one output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileResult {
    /// Path with extension, relative to the output root.
    pub path: String,
    pub language: GenLang,
    pub class_name: String,
    pub code: GenResultCode,
}

/// Overall outcome for one form in one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormResult {
    pub class_name: String,
    pub language: GenLang,
    pub code: GenResultCode,
}

/// Everything a project run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectResults {
    pub files: Vec<FileResult>,
    pub forms: Vec<FormResult>,
    /// Warnings of every form, first occurrence order, without duplicates.
    pub warnings: Vec<String>,
    /// Files that were written, or would be by a dry run.
    pub updated: usize,
    /// One message per failed form or file.
    pub failures: Vec<String>,
}

impl ProjectResults {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Files with the given result code.
    pub fn files_with(&self, code: GenResultCode) -> impl Iterator<Item = &FileResult> {
        self.files.iter().filter(move |file| file.code == code)
    }

    pub fn paths(&self) -> Vec<&str> {
        self.files.iter().map(|file| file.path.as_str()).collect()
    }
}

/// Result of a single (form, language) job before merging.
struct JobOutcome {
    form: FormResult,
    files: Vec<FileResult>,
    warnings: Vec<String>,
    failures: Vec<String>,
}

/// Generates and writes every form of a project.
pub struct ProjectGenerator<'a> {
    cache: &'a AssetCache,
    options: &'a GenerationOptions,
    writer: &'a dyn FileWriter,
}

impl<'a> ProjectGenerator<'a> {
    pub fn new(cache: &'a AssetCache, options: &'a GenerationOptions, writer: &'a dyn FileWriter) -> Self {
        Self { cache, options, writer }
    }

    /// Generate every form under the project root in each of `languages`.
    ///
    /// Failures are reported per form; they never stop the other forms.
    pub fn generate(&self, tree: &DesignTree, languages: &[GenLang]) -> ProjectResults {
        let jobs: Vec<(NodeId, GenLang)> = tree
            .forms()
            .into_iter()
            .flat_map(|form| languages.iter().map(move |&language| (form, language)))
            .collect();

        let outcomes: Vec<JobOutcome> = if self.options.parallel_collection {
            jobs.par_iter()
                .map(|&(form, language)| self.run_job(tree, form, language))
                .collect()
        } else {
            jobs.iter()
                .map(|&(form, language)| self.run_job(tree, form, language))
                .collect()
        };

        let mut results = ProjectResults::default();
        let mut warnings = IndexSet::new();
        for outcome in outcomes {
            results.updated += outcome
                .files
                .iter()
                .filter(|file| matches!(file.code, GenResultCode::Created | GenResultCode::NeedsWriting))
                .count();
            results.files.extend(outcome.files);
            results.forms.push(outcome.form);
            warnings.extend(outcome.warnings);
            results.failures.extend(outcome.failures);
        }
        results.warnings = warnings.into_iter().collect();
        results
    }

    fn run_job(&self, tree: &DesignTree, form: NodeId, language: GenLang) -> JobOutcome {
        let class_name = tree.get(form).map(|node| node.class_name().to_string()).unwrap_or_default();

        let output = match self.generate_output(tree, form, language) {
            Ok(output) => output,
            Err(err) => {
                let message = format!("{class_name} ({language}): {err}");
                warn!(form = %class_name, language = %language, error = %err, "form generation failed");
                return JobOutcome {
                    form: FormResult {
                        class_name,
                        language,
                        code: GenResultCode::Fail,
                    },
                    files: Vec::new(),
                    warnings: Vec::new(),
                    failures: vec![message],
                };
            }
        };

        let mut files = Vec::with_capacity(output.files.len());
        let mut failures = Vec::new();
        for file in &output.files {
            let path = file.full_path();
            let code = match self.writer.write(file) {
                Ok(code) => code,
                Err(err) => {
                    warn!(path = %path, error = %err, "writing failed");
                    failures.push(format!("{path}: {err}"));
                    GenResultCode::Fail
                }
            };
            files.push(FileResult {
                path,
                language,
                class_name: output.class_name.clone(),
                code,
            });
        }

        let code = if output.code == GenResultCode::Ignored {
            GenResultCode::Ignored
        } else {
            summarize(&files)
        };
        info!(form = %output.class_name, language = %language, code = ?code, files = files.len(), "form done");

        JobOutcome {
            form: FormResult {
                class_name: output.class_name,
                language,
                code,
            },
            files,
            warnings: output.warnings,
            failures,
        }
    }

    fn generate_output(&self, tree: &DesignTree, form: NodeId, language: GenLang) -> Result<FormOutput> {
        let output = match language {
            GenLang::Xrc => formgen_xrc::generate_form(tree, form, self.options)?,
            _ => FormGenerator::new(tree, self.cache, self.options).generate(form, language)?,
        };
        Ok(output)
    }
}

/// The form's code is the most significant code of its files.
fn summarize(files: &[FileResult]) -> GenResultCode {
    let has = |code| files.iter().any(|file| file.code == code);
    if has(GenResultCode::Fail) {
        GenResultCode::Fail
    } else if has(GenResultCode::Created) {
        GenResultCode::Created
    } else if has(GenResultCode::NeedsWriting) {
        GenResultCode::NeedsWriting
    } else {
        GenResultCode::AlreadyExists
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use formgen_codegen::OutputFile;
    use formgen_core::{GenName, MemoryAssetSource, NodeBuilder, PropName};

    use super::*;
    use crate::error::FormgenError;
    use crate::writer::{DiskWriter, DryRunWriter};

    fn project() -> DesignTree {
        DesignTree::new(
            NodeBuilder::new(GenName::Project)
                .with_child(NodeBuilder::new(GenName::Images))
                .with_child(
                    NodeBuilder::new(GenName::Dialog)
                        .with_prop(PropName::ClassName, "AboutDialog")
                        .with_child(NodeBuilder::new(GenName::VerticalBoxSizer).with_child(
                            NodeBuilder::new(GenName::StaticText)
                                .with_prop(PropName::VarName, "m_version")
                                .with_prop(PropName::Label, "Version 1.0"),
                        )),
                )
                .with_child(
                    NodeBuilder::new(GenName::Folder).with_child(
                        NodeBuilder::new(GenName::Frame)
                            .with_prop(PropName::ClassName, "MainFrame")
                            .with_child(NodeBuilder::new(GenName::StatusBar)),
                    ),
                ),
        )
    }

    fn cache() -> AssetCache {
        AssetCache::new(Arc::new(MemoryAssetSource::new()))
    }

    fn sequential() -> GenerationOptions {
        GenerationOptions {
            parallel_collection: false,
            ..GenerationOptions::default()
        }
    }

    struct FailingWriter;

    impl FileWriter for FailingWriter {
        fn write(&self, file: &OutputFile) -> Result<GenResultCode> {
            Err(FormgenError::Io {
                path: file.full_path().into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            })
        }
    }

    #[test]
    fn test_dry_run_every_form_and_language() {
        let tree = project();
        let cache = cache();
        let options = GenerationOptions::default();
        let writer = DryRunWriter::new();

        let results = ProjectGenerator::new(&cache, &options, &writer).generate(&tree, &[GenLang::Python, GenLang::Xrc]);

        assert!(results.is_success());
        assert_eq!(
            results.paths(),
            vec!["about_dialog.py", "about_dialog.xrc", "main_frame.py", "main_frame.xrc"]
        );
        assert_eq!(results.updated, 4);
        assert_eq!(results.files_with(GenResultCode::NeedsWriting).count(), 4);
        assert_eq!(writer.pending().len(), 4);

        // Images, dialog and frame in both languages.
        assert_eq!(results.forms.len(), 6);
        assert_eq!(results.forms[0].code, GenResultCode::Ignored);
        assert_eq!(results.forms[1].code, GenResultCode::Ignored);
        assert_eq!(results.forms[2].class_name, "AboutDialog");
        assert_eq!(results.forms[2].code, GenResultCode::NeedsWriting);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let tree = project();
        let cache = cache();
        let parallel = GenerationOptions::all_languages();
        let sequential = GenerationOptions {
            parallel_collection: false,
            ..GenerationOptions::all_languages()
        };

        let first = ProjectGenerator::new(&cache, &parallel, &DryRunWriter::new()).generate(&tree, &parallel.languages);
        let second =
            ProjectGenerator::new(&cache, &sequential, &DryRunWriter::new()).generate(&tree, &sequential.languages);
        assert_eq!(first, second);
    }

    #[test]
    fn test_second_disk_run_is_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let tree = project();
        let cache = cache();
        let options = sequential();
        let writer = DiskWriter::new(dir.path());
        let generator = ProjectGenerator::new(&cache, &options, &writer);

        let first = generator.generate(&tree, &[GenLang::Cpp]);
        assert_eq!(first.updated, 4);
        assert_eq!(first.files_with(GenResultCode::Created).count(), 4);
        assert!(dir.path().join("about_dialog.h").exists());
        assert!(dir.path().join("main_frame.cpp").exists());

        let second = generator.generate(&tree, &[GenLang::Cpp]);
        assert_eq!(second.updated, 0);
        assert_eq!(second.files_with(GenResultCode::AlreadyExists).count(), 4);
        assert_eq!(second.forms[1].code, GenResultCode::AlreadyExists);
    }

    #[test]
    fn test_writer_failures_are_reported_per_form() {
        let tree = project();
        let cache = cache();
        let options = sequential();

        let results = ProjectGenerator::new(&cache, &options, &FailingWriter).generate(&tree, &[GenLang::Ruby]);
        assert!(!results.is_success());
        assert_eq!(results.failures.len(), 2);
        assert_eq!(results.updated, 0);
        assert_eq!(results.forms[0].code, GenResultCode::Ignored);
        assert_eq!(results.forms[1].code, GenResultCode::Fail);
        assert_eq!(results.forms[2].code, GenResultCode::Fail);
    }

    #[test]
    fn test_no_languages() {
        let tree = project();
        let cache = cache();
        let options = GenerationOptions::default();
        let results = ProjectGenerator::new(&cache, &options, &DryRunWriter::new()).generate(&tree, &[]);
        assert_eq!(results, ProjectResults::default());
    }
}

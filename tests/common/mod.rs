// ABOUTME: Common utilities and helpers for integration tests
// ABOUTME: Provides a builder for CI workflow documents with mutation knobs

#![allow(dead_code)]

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::fs;

/// Path of the canonical workflow document shipped with this repository.
pub fn repo_workflow_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join(".github")
        .join("workflows")
        .join("django.yml")
}

/// Builds a Django-style CI workflow document. The default output satisfies
/// every policy check; the `with_*`/`without_*` knobs break one expectation
/// at a time so tests can assert the specific failure.
pub struct CiWorkflowBuilder {
    name: Option<String>,
    push_branches: Option<Vec<String>>,
    pull_request_branches: Option<Vec<String>>,
    concurrency: bool,
    cancel_in_progress: bool,
    python_versions: Vec<String>,
    migration_env: Vec<(String, String)>,
    test_env: Vec<(String, String)>,
    cache_path: String,
    lint_needs: Option<String>,
    build_needs: Vec<String>,
    build_condition: Option<String>,
    omitted_jobs: HashSet<String>,
    omitted_steps: HashSet<String>,
    extra_jobs: Vec<(String, Vec<String>)>,
}

impl Default for CiWorkflowBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CiWorkflowBuilder {
    pub fn new() -> Self {
        Self {
            name: Some("Django CI".to_string()),
            push_branches: Some(vec!["main".to_string(), "develop".to_string()]),
            pull_request_branches: Some(vec!["main".to_string(), "develop".to_string()]),
            concurrency: true,
            cancel_in_progress: true,
            python_versions: vec!["3.10".to_string(), "3.11".to_string(), "3.12".to_string()],
            migration_env: vec![
                ("SECRET_KEY".to_string(), "test-secret-key".to_string()),
                ("DEBUG".to_string(), "True".to_string()),
            ],
            test_env: vec![
                ("EMAIL_HOST_USER".to_string(), "ci-user".to_string()),
                ("EMAIL_HOST_PASSWORD".to_string(), "ci-password".to_string()),
                ("GOOGLE_OAUTH_CLIENT_ID".to_string(), "ci-client-id".to_string()),
                (
                    "GOOGLE_OAUTH_CLIENT_SECRET".to_string(),
                    "ci-client-secret".to_string(),
                ),
            ],
            cache_path: "~/.cache/pip".to_string(),
            lint_needs: Some("test".to_string()),
            build_needs: vec![
                "test".to_string(),
                "lint".to_string(),
                "security".to_string(),
            ],
            build_condition: Some("github.ref == 'refs/heads/main'".to_string()),
            omitted_jobs: HashSet::new(),
            omitted_steps: HashSet::new(),
            extra_jobs: Vec::new(),
        }
    }

    pub fn without_name(mut self) -> Self {
        self.name = None;
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_push_branches(mut self, branches: &[&str]) -> Self {
        self.push_branches = Some(branches.iter().map(|b| b.to_string()).collect());
        self
    }

    pub fn without_triggers(mut self) -> Self {
        self.push_branches = None;
        self.pull_request_branches = None;
        self
    }

    pub fn without_concurrency(mut self) -> Self {
        self.concurrency = false;
        self
    }

    pub fn with_cancel_in_progress(mut self, cancel: bool) -> Self {
        self.cancel_in_progress = cancel;
        self
    }

    pub fn with_python_versions(mut self, versions: &[&str]) -> Self {
        self.python_versions = versions.iter().map(|v| v.to_string()).collect();
        self
    }

    pub fn without_job(mut self, job_id: &str) -> Self {
        self.omitted_jobs.insert(job_id.to_string());
        self
    }

    pub fn without_step(mut self, step_name: &str) -> Self {
        self.omitted_steps.insert(step_name.to_string());
        self
    }

    pub fn without_lint_needs(mut self) -> Self {
        self.lint_needs = None;
        self
    }

    pub fn with_build_needs(mut self, needs: &[&str]) -> Self {
        self.build_needs = needs.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn without_build_condition(mut self) -> Self {
        self.build_condition = None;
        self
    }

    pub fn without_env_var(mut self, var: &str) -> Self {
        self.migration_env.retain(|(key, _)| key != var);
        self.test_env.retain(|(key, _)| key != var);
        self
    }

    pub fn with_cache_path(mut self, path: &str) -> Self {
        self.cache_path = path.to_string();
        self
    }

    /// Add a bare job with the given dependencies, for graph checks.
    pub fn with_extra_job(mut self, job_id: &str, needs: &[&str]) -> Self {
        self.extra_jobs.push((
            job_id.to_string(),
            needs.iter().map(|n| n.to_string()).collect(),
        ));
        self
    }

    pub fn generate_yaml(&self) -> String {
        let mut yaml = String::new();

        if let Some(ref name) = self.name {
            yaml.push_str(&format!("name: {}\n\n", name));
        }

        if self.push_branches.is_some() || self.pull_request_branches.is_some() {
            yaml.push_str("on:\n");
            if let Some(ref branches) = self.push_branches {
                yaml.push_str(&format!("  push:\n    branches: [{}]\n", branches.join(", ")));
            }
            if let Some(ref branches) = self.pull_request_branches {
                yaml.push_str(&format!(
                    "  pull_request:\n    branches: [{}]\n",
                    branches.join(", ")
                ));
            }
            yaml.push('\n');
        }

        if self.concurrency {
            yaml.push_str("concurrency:\n");
            yaml.push_str("  group: ${{ github.workflow }}-${{ github.ref }}\n");
            yaml.push_str(&format!(
                "  cancel-in-progress: {}\n\n",
                self.cancel_in_progress
            ));
        }

        yaml.push_str("jobs:\n");
        if !self.omitted_jobs.contains("test") {
            yaml.push_str(&self.render_test_job());
        }
        if !self.omitted_jobs.contains("lint") {
            yaml.push_str(&self.render_lint_job());
        }
        if !self.omitted_jobs.contains("security") {
            yaml.push_str(&self.render_security_job());
        }
        if !self.omitted_jobs.contains("build") {
            yaml.push_str(&self.render_build_job());
        }
        for (job_id, needs) in &self.extra_jobs {
            yaml.push_str(&format!("  {}:\n    runs-on: ubuntu-latest\n", job_id));
            if !needs.is_empty() {
                yaml.push_str(&format!("    needs: [{}]\n", needs.join(", ")));
            }
            yaml.push_str("    steps:\n      - name: Placeholder\n        run: echo ok\n");
        }

        yaml
    }

    pub async fn write_to_file(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        fs::write(path, self.generate_yaml()).await?;
        Ok(())
    }

    fn render_test_job(&self) -> String {
        let mut job = String::from("  test:\n    runs-on: ubuntu-latest\n");

        job.push_str("    strategy:\n      matrix:\n");
        let quoted: Vec<String> = self
            .python_versions
            .iter()
            .map(|v| format!("\"{}\"", v))
            .collect();
        job.push_str(&format!("        python-version: [{}]\n", quoted.join(", ")));

        job.push_str("    steps:\n");
        self.push_step(&mut job, "Checkout repository", |step| {
            step.push_str("        uses: actions/checkout@v4\n");
        });
        self.push_step(&mut job, "Set up Python", |step| {
            step.push_str("        uses: actions/setup-python@v5\n");
            step.push_str("        with:\n          python-version: ${{ matrix.python-version }}\n");
        });
        let cache_path = self.cache_path.clone();
        self.push_step(&mut job, "Cache pip packages", move |step| {
            step.push_str("        uses: actions/cache@v4\n");
            step.push_str(&format!(
                "        with:\n          path: {}\n          key: pip-cache\n",
                cache_path
            ));
        });
        self.push_step(&mut job, "Install dependencies", |step| {
            step.push_str("        run: pip install -r requirements.txt\n");
        });
        let migration_env = self.migration_env.clone();
        self.push_step(&mut job, "Run migrations", move |step| {
            step.push_str("        run: python manage.py migrate --noinput\n");
            push_env(step, &migration_env);
        });
        let test_env = self.test_env.clone();
        self.push_step(&mut job, "Run tests", move |step| {
            step.push_str("        run: python manage.py test\n");
            push_env(step, &test_env);
        });

        job.push('\n');
        job
    }

    fn render_lint_job(&self) -> String {
        let mut job = String::from("  lint:\n    runs-on: ubuntu-latest\n");
        if let Some(ref needs) = self.lint_needs {
            job.push_str(&format!("    needs: {}\n", needs));
        }
        job.push_str("    steps:\n");
        self.push_step(&mut job, "Checkout repository", |step| {
            step.push_str("        uses: actions/checkout@v4\n");
        });
        self.push_step(&mut job, "Check formatting with Black", |step| {
            step.push_str("        run: black --check .\n");
        });
        self.push_step(&mut job, "Check import order with isort", |step| {
            step.push_str("        run: isort --check-only .\n");
        });
        self.push_step(&mut job, "Run flake8", |step| {
            step.push_str("        run: flake8 .\n");
        });
        job.push('\n');
        job
    }

    fn render_security_job(&self) -> String {
        let mut job = String::from("  security:\n    runs-on: ubuntu-latest\n    needs: test\n");
        job.push_str("    steps:\n");
        self.push_step(&mut job, "Checkout repository", |step| {
            step.push_str("        uses: actions/checkout@v4\n");
        });
        self.push_step(&mut job, "Run Bandit security scan", |step| {
            step.push_str("        run: bandit -r .\n");
        });
        self.push_step(&mut job, "Audit dependencies with Safety", |step| {
            step.push_str("        run: safety check\n");
        });
        job.push('\n');
        job
    }

    fn render_build_job(&self) -> String {
        let mut job = String::from("  build:\n    runs-on: ubuntu-latest\n");
        if !self.build_needs.is_empty() {
            job.push_str(&format!("    needs: [{}]\n", self.build_needs.join(", ")));
        }
        if let Some(ref condition) = self.build_condition {
            job.push_str(&format!("    if: {}\n", condition));
        }
        job.push_str("    steps:\n");
        self.push_step(&mut job, "Checkout repository", |step| {
            step.push_str("        uses: actions/checkout@v4\n");
        });
        self.push_step(&mut job, "Collect static files", |step| {
            step.push_str("        run: python manage.py collectstatic --noinput\n");
        });
        self.push_step(&mut job, "Create deployment package", |step| {
            step.push_str("        run: tar -czf release.tar.gz .\n");
        });
        self.push_step(&mut job, "Upload build artifact", |step| {
            step.push_str("        uses: actions/upload-artifact@v4\n");
            step.push_str("        with:\n          name: django-release\n          path: release.tar.gz\n");
        });
        job.push('\n');
        job
    }

    fn push_step<F: FnOnce(&mut String)>(&self, job: &mut String, name: &str, body: F) {
        if self.omitted_steps.contains(name) {
            return;
        }
        job.push_str(&format!("      - name: {}\n", name));
        body(job);
    }
}

fn push_env(step: &mut String, env: &[(String, String)]) {
    if env.is_empty() {
        return;
    }
    step.push_str("        env:\n");
    for (key, value) in env {
        step.push_str(&format!("          {}: \"{}\"\n", key, value));
    }
}

pub struct TestEnvironment {
    pub temp_dir: TempDir,
}

impl Default for TestEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnvironment {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn workflow_file(&self, name: &str) -> PathBuf {
        self.path().join(format!("{}.yml", name))
    }

    pub async fn create_workflow_file(&self, name: &str, builder: &CiWorkflowBuilder) -> PathBuf {
        let workflow_file = self.workflow_file(name);
        builder
            .write_to_file(&workflow_file)
            .await
            .expect("Failed to write workflow file");
        workflow_file
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_default_is_canonical() {
        let yaml = CiWorkflowBuilder::new().generate_yaml();

        assert!(yaml.contains("name: Django CI"));
        assert!(yaml.contains("branches: [main, develop]"));
        assert!(yaml.contains("cancel-in-progress: true"));
        assert!(yaml.contains("  test:"));
        assert!(yaml.contains("  lint:"));
        assert!(yaml.contains("  security:"));
        assert!(yaml.contains("  build:"));
    }

    #[test]
    fn test_builder_knobs_change_output() {
        let yaml = CiWorkflowBuilder::new()
            .without_job("build")
            .without_lint_needs()
            .with_cache_path("/tmp/pip")
            .generate_yaml();

        let workflow = flowcheck::Workflow::from_yaml(&yaml).unwrap();
        assert!(!workflow.has_job("build"));
        assert!(workflow.job("lint").unwrap().needs.is_none());
        assert!(yaml.contains("path: /tmp/pip"));
    }
}

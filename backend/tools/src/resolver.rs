//! Logical file name → path resolution.

use std::path::{Component, Path, PathBuf};

use docscan_core::ExecutionContext;

/// Turns a caller-supplied file name into a concrete path (or object key).
pub trait PathResolver: Send + Sync {
    /// `None` when the name cannot be resolved.
    fn resolve(&self, file_name: &str, ctx: &ExecutionContext) -> Option<PathBuf>;
}

/// Names must stay inside the resource root: relative, no `..`.
fn is_contained(file_name: &str) -> bool {
    !file_name.trim().is_empty()
        && Path::new(file_name)
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Resolves every name against one fixed resource root.
#[derive(Debug, Clone)]
pub struct DirectoryResolver {
    root: PathBuf,
}

impl DirectoryResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl PathResolver for DirectoryResolver {
    fn resolve(&self, file_name: &str, _ctx: &ExecutionContext) -> Option<PathBuf> {
        is_contained(file_name).then(|| self.root.join(file_name))
    }
}

/// Prefers the invoking execution's own directory, falling back to the root.
///
/// Layout: `<root>/agent_<agent_id>/execution_<agent_execution_id>/<file_name>`.
#[derive(Debug, Clone)]
pub struct AgentScopedResolver {
    root: PathBuf,
}

impl AgentScopedResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn execution_dir(&self, ctx: &ExecutionContext) -> Option<PathBuf> {
        let (agent, execution) = (ctx.agent_id?, ctx.agent_execution_id?);
        Some(
            self.root
                .join(format!("agent_{agent}"))
                .join(format!("execution_{execution}")),
        )
    }
}

impl PathResolver for AgentScopedResolver {
    fn resolve(&self, file_name: &str, ctx: &ExecutionContext) -> Option<PathBuf> {
        if !is_contained(file_name) {
            return None;
        }
        if let Some(dir) = self.execution_dir(ctx) {
            let scoped = dir.join(file_name);
            if scoped.exists() {
                return Some(scoped);
            }
        }
        Some(self.root.join(file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_joins_root() {
        let r = DirectoryResolver::new("/data/input");
        assert_eq!(
            r.resolve("scans/a.png", &ExecutionContext::default()),
            Some(PathBuf::from("/data/input/scans/a.png"))
        );
    }

    #[test]
    fn rejects_escaping_names() {
        let r = DirectoryResolver::new("/data/input");
        let ctx = ExecutionContext::default();
        assert_eq!(r.resolve("../secret.txt", &ctx), None);
        assert_eq!(r.resolve("/etc/passwd", &ctx), None);
        assert_eq!(r.resolve("", &ctx), None);
    }

    #[test]
    fn agent_scoped_prefers_execution_dir() {
        let root = tempfile::tempdir().unwrap();
        let exec_dir = root.path().join("agent_7").join("execution_3");
        std::fs::create_dir_all(&exec_dir).unwrap();
        std::fs::write(exec_dir.join("page.png"), b"x").unwrap();

        let r = AgentScopedResolver::new(root.path());
        let ctx = ExecutionContext::new(7, 3);
        assert_eq!(r.resolve("page.png", &ctx), Some(exec_dir.join("page.png")));
    }

    #[test]
    fn agent_scoped_falls_back_to_root() {
        let root = tempfile::tempdir().unwrap();
        let r = AgentScopedResolver::new(root.path());
        assert_eq!(
            r.resolve("other.png", &ExecutionContext::new(7, 3)),
            Some(root.path().join("other.png"))
        );
        assert_eq!(
            r.resolve("other.png", &ExecutionContext::default()),
            Some(root.path().join("other.png"))
        );
    }
}

//! The analysis context that owns the built-in environment.

use tracing::info;

use crate::builtins::{BuiltinKind, Templates};
use crate::error::BuiltinError;
use crate::registry::BuiltinRegistry;

/// One analysis session, e.g. one open project.
///
/// Built-ins are created lazily within a context and dropped with it.
/// Separate contexts never share instances.
#[derive(Debug, Default)]
pub struct AnalysisContext {
    builtins: BuiltinRegistry,
}

impl AnalysisContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_templates(templates: Templates) -> Self {
        Self {
            builtins: BuiltinRegistry::with_templates(templates),
        }
    }

    pub fn builtins(&self) -> &BuiltinRegistry {
        &self.builtins
    }

    /// Construct every built-in now and return the first failure, for
    /// callers that prefer to fail when the context starts.
    pub fn warm_up(&self) -> Result<(), BuiltinError> {
        for kind in BuiltinKind::ALL {
            self.builtins.get(kind)?;
        }
        info!(built = self.builtins.built_count(), "built-in environment ready");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warm_up_builds_everything_once() {
        let ctx = AnalysisContext::new();
        ctx.warm_up().unwrap();
        assert_eq!(ctx.builtins().built_count(), BuiltinKind::ALL.len());
        ctx.warm_up().unwrap();
        assert_eq!(ctx.builtins().built_count(), BuiltinKind::ALL.len());
    }

    #[test]
    fn warm_up_surfaces_template_defects() {
        let ctx = AnalysisContext::with_templates(Templates {
            array_members: "function push(uint value)".into(),
            ..Templates::default()
        });
        let err = ctx.warm_up().unwrap_err();
        assert_eq!(err.canonical(), "@Array");
    }
}

use serde::{Deserialize, Serialize};

mod cache;
mod resolve;

pub use cache::{Cache, CacheStats};
pub use resolve::ResolveMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// Lifecycle of one generation call.
///
/// `Idle -> ResolvingPackage -> BuildingShapes -> Generating -> Done`, with
/// `Failed` reachable from `ResolvingPackage` and `Generating`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    Idle,
    ResolvingPackage,
    BuildingShapes,
    Generating,
    Done,
    Failed,
}

impl Stage {
    pub fn can_transition_to(self, next: Stage) -> bool {
        use Stage::*;
        matches!(
            (self, next),
            (Idle, ResolvingPackage)
                | (Idle, Failed)
                | (ResolvingPackage, BuildingShapes)
                | (ResolvingPackage, Failed)
                | (BuildingShapes, Generating)
                | (BuildingShapes, Failed)
                | (Generating, Generating)
                | (Generating, Done)
                | (Generating, Failed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Done | Stage::Failed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub stage: Stage,
    pub message: String,
    pub shape_index: Option<usize>,
}

impl Diagnostic {
    pub fn new(severity: Severity, stage: Stage, message: impl Into<String>) -> Self {
        Self {
            severity,
            stage,
            message: message.into(),
            shape_index: None,
        }
    }

    pub fn error(stage: Stage, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, stage, message)
    }

    pub fn warning(stage: Stage, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, stage, message)
    }

    pub fn for_shape(mut self, index: usize) -> Self {
        self.shape_index = Some(index);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_transitions_are_allowed() {
        let path = [
            Stage::Idle,
            Stage::ResolvingPackage,
            Stage::BuildingShapes,
            Stage::Generating,
            Stage::Generating,
            Stage::Done,
        ];
        for pair in path.windows(2) {
            assert!(pair[0].can_transition_to(pair[1]), "{:?} -> {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn terminal_stages_do_not_transition() {
        for next in [Stage::Idle, Stage::Generating, Stage::Done] {
            assert!(!Stage::Done.can_transition_to(next));
            assert!(!Stage::Failed.can_transition_to(next));
        }
        assert!(Stage::Done.is_terminal());
        assert!(!Stage::Generating.is_terminal());
    }

    #[test]
    fn diagnostic_carries_shape_index() {
        let diag = Diagnostic::error(Stage::Generating, "engine failed").for_shape(3);
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.shape_index, Some(3));
    }
}

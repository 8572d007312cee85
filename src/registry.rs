//! Declarative session registration and name resolution.
//!
//! A [`SessionDef`] is a template; registering it materializes one [`Task`]
//! per value of its parametrization axis (or a single task without one).
//! A bare name addresses every variant, a signature `name(value)` exactly one.

use crate::error::Result;
use crate::session::Session;

/// A session body: receives the session and, for parametrized sessions,
/// the variant's value.
pub type Handler = fn(&mut Session<'_>, Option<&str>) -> Result<()>;

/// A parametrization axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Argument name, for listings.
    pub key: &'static str,
    /// One task variant per value.
    pub values: Vec<String>,
}

/// A registered session template.
#[derive(Clone)]
pub struct SessionDef {
    /// Unique session name.
    pub name: &'static str,
    /// One-line description shown by `--list`.
    pub description: Option<&'static str>,
    /// Interpreter version for the environment, e.g. `3.11`.
    pub python: Option<&'static str>,
    /// Whether the session gets an isolated environment.
    pub venv: bool,
    /// Optional parametrization axis.
    pub parameter: Option<Parameter>,
    /// The body.
    pub handler: Handler,
}

impl SessionDef {
    /// A plain session with its own environment.
    #[must_use]
    pub fn new(name: &'static str, handler: Handler) -> Self {
        Self { name, description: None, python: None, venv: true, parameter: None, handler }
    }

    /// Sets the `--list` description.
    #[must_use]
    pub fn description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    /// Pins the environment's interpreter version.
    #[must_use]
    pub fn python(mut self, version: &'static str) -> Self {
        self.python = Some(version);
        self
    }

    /// Runs without an environment (aggregators, host-only tools).
    #[must_use]
    pub fn without_venv(mut self) -> Self {
        self.venv = false;
        self
    }

    /// Materializes one task per value.
    #[must_use]
    pub fn parametrize(mut self, key: &'static str, values: Vec<String>) -> Self {
        self.parameter = Some(Parameter { key, values });
        self
    }
}

/// One addressable variant of a [`SessionDef`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    def: usize,
    value: Option<String>,
    signature: String,
}

impl Task {
    /// `name` or `name(value)`.
    #[must_use]
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// The parametrization value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

/// All registered sessions and their materialized tasks.
#[derive(Default)]
pub struct Registry {
    defs: Vec<SessionDef>,
    tasks: Vec<Task>,
}

impl Registry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `def`, materializing its tasks. A second definition with
    /// the same name is ignored with a warning.
    pub fn register(&mut self, def: SessionDef) -> &mut Self {
        if self.defs.iter().any(|existing| existing.name == def.name) {
            tracing::warn!("session {} registered twice; keeping the first", def.name);
            return self;
        }
        let index = self.defs.len();
        match &def.parameter {
            None => {
                self.tasks.push(Task { def: index, value: None, signature: def.name.to_string() });
            }
            Some(parameter) => {
                for value in &parameter.values {
                    self.tasks.push(Task {
                        def: index,
                        value: Some(value.clone()),
                        signature: format!("{}({value})", def.name),
                    });
                }
            }
        }
        self.defs.push(def);
        self
    }

    /// Registered templates, in registration order.
    #[must_use]
    pub fn defs(&self) -> &[SessionDef] {
        &self.defs
    }

    /// Materialized tasks, in registration order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// The task with index `id`.
    #[must_use]
    pub fn task(&self, id: usize) -> &Task {
        &self.tasks[id]
    }

    /// The template behind task `id`.
    #[must_use]
    pub fn def_of(&self, id: usize) -> &SessionDef {
        &self.defs[self.tasks[id].def]
    }

    /// Task indices addressed by `name`.
    ///
    /// `None` when nothing is registered under that name or signature;
    /// `Some(empty)` for a parametrized session whose axis is empty.
    #[must_use]
    pub fn matching(&self, name: &str) -> Option<Vec<usize>> {
        let by_signature: Vec<usize> = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| task.signature == name || self.defs[task.def].name == name)
            .map(|(id, _)| id)
            .collect();
        if by_signature.is_empty() && !self.defs.iter().any(|def| def.name == name) {
            return None;
        }
        Some(by_signature)
    }
}

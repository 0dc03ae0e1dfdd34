//! `before` / `after` dependency execution.

use super::executor::{ExecutionContext, ScriptRunner};
use crate::error::{exit_code, PyssError, Result};
use crate::scripts::{
    CommandSpec, Dependency, DependencyAction, DependencySpec, DetailedDependency,
    ScriptDefinition,
};

impl ScriptRunner<'_> {
    /// Run a dependency spec in order, stopping at the first non-zero exit code.
    ///
    /// `owner` is the script the hooks belong to; inline commands use its
    /// shell default.
    pub fn run_dependencies(
        &self,
        spec: &DependencySpec,
        owner: &ScriptDefinition,
        ctx: &ExecutionContext,
    ) -> Result<i32> {
        for dependency in spec.as_slice() {
            let code = self.run_dependency(dependency, owner, ctx)?;
            if code != exit_code::SUCCESS {
                log::debug!("dependency of '{}' exited with {code}", owner.name());
                return Ok(code);
            }
        }
        Ok(exit_code::SUCCESS)
    }

    fn run_dependency(
        &self,
        dependency: &Dependency,
        owner: &ScriptDefinition,
        ctx: &ExecutionContext,
    ) -> Result<i32> {
        match dependency {
            Dependency::Shorthand(name) if self.table().contains(name) => self.run(name, ctx),
            Dependency::Shorthand(command) => {
                self.run_command(&CommandSpec::literal(command.as_str()), owner, ctx)
            }
            Dependency::Detailed(detailed) => self.run_detailed(detailed, owner, ctx),
        }
    }

    fn run_detailed(
        &self,
        dependency: &DetailedDependency,
        owner: &ScriptDefinition,
        ctx: &ExecutionContext,
    ) -> Result<i32> {
        let silent = dependency.silent.unwrap_or(ctx.disable_output());
        let ctx = ctx.with_output_disabled(silent).primed(&dependency.env);

        match &dependency.action {
            DependencyAction::Script(name) => {
                if !self.table().contains(name) {
                    return Err(PyssError::ScriptNotFound { name: name.clone() });
                }
                self.run(name, &ctx)
            }
            DependencyAction::Command(spec) => self.run_command(spec, owner, &ctx),
            DependencyAction::Commands(specs) => self.run_commands(specs, owner, &ctx),
        }
    }
}

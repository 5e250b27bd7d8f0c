//! A minimal ninja syntax writer.
//!
//! Covers the statements the emitter needs: pools, rules, build edges with
//! implicit inputs, and default-target declarations. Statements
//! accumulate in an in-memory buffer so callers can write the whole script
//! in one step.

use std::fmt::Write;

/// Writer for the ninja build language.
#[derive(Debug, Default)]
pub struct NinjaWriter {
    buf: String,
}

impl NinjaWriter {
    pub fn new() -> Self {
        <Self as Default>::default()
    }

    /// `# text`
    pub fn comment(&mut self, text: &str) {
        let _ = writeln!(self.buf, "# {text}");
    }

    /// `pool name` with an indented depth binding.
    pub fn pool(&mut self, name: &str, depth: u32) {
        let _ = writeln!(self.buf, "pool {name}");
        let _ = writeln!(self.buf, "  depth = {depth}");
    }

    /// `rule name` with an indented command and passthrough attributes.
    pub fn rule<'a>(
        &mut self,
        name: &str,
        command: &str,
        attrs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) {
        let _ = writeln!(self.buf, "rule {name}");
        let _ = writeln!(self.buf, "  command = {command}");
        for (key, value) in attrs {
            let _ = writeln!(self.buf, "  {key} = {value}");
        }
    }

    /// `build output: rule inputs... | implicit...`
    pub fn build(&mut self, output: &str, rule: &str, inputs: &[String], implicit: &[String]) {
        let _ = write!(self.buf, "build {}: {rule}", escape_path(output));
        for input in inputs {
            let _ = write!(self.buf, " {}", escape_path(input));
        }
        if !implicit.is_empty() {
            let _ = write!(self.buf, " |");
            for input in implicit {
                let _ = write!(self.buf, " {}", escape_path(input));
            }
        }
        self.buf.push('\n');
    }

    /// `default target`
    pub fn default(&mut self, target: &str) {
        let _ = writeln!(self.buf, "default {}", escape_path(target));
    }

    /// Consume the writer, yielding the rendered script.
    pub fn into_string(self) -> String {
        self.buf
    }
}

/// Escape a path for use in a build statement. `$`, space, and `:` are
/// significant to ninja's lexer and must be `$`-escaped.
fn escape_path(path: &str) -> String {
    path.replace('$', "$$").replace(' ', "$ ").replace(':', "$:")
}

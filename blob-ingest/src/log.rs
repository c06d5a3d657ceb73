/// Diagnostic lines for one invocation, handed back to the hosting runtime.
///
/// Every line is also emitted through `tracing`.
#[derive(Debug, Default, Clone)]
pub struct InvocationLog {
    lines: Vec<String>,
}

impl InvocationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, line: impl Into<String>) {
        let line = line.into();
        tracing::info!("{}", line);
        self.lines.push(line);
    }

    pub fn error(&mut self, line: impl Into<String>) {
        let line = line.into();
        tracing::error!("{}", line);
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

use std::io::Write;

/// Abstract the host environment to enable testing
pub trait Host {
    // where plugin output goes (stdout, read by the monitoring system)
    fn output(&mut self) -> impl Write;

    // where diagnostics go (stderr)
    fn error(&mut self) -> impl Write;

    /// Terminate the process with the plugin exit code (a test host just records it).
    fn exit(&mut self, code: i32);
}

/// Test host that captures output and the exit code
#[cfg(test)]
#[derive(Debug, Default)]
pub struct TestHost {
    pub output_buf: Vec<u8>,
    pub error_buf: Vec<u8>,
    pub exit_code: Option<i32>,
}

#[cfg(test)]
impl TestHost {
    pub fn output_str(&self) -> String {
        String::from_utf8_lossy(&self.output_buf).into_owned()
    }
}

#[cfg(test)]
impl Host for TestHost {
    fn output(&mut self) -> impl Write {
        &mut self.output_buf
    }

    fn error(&mut self) -> impl Write {
        &mut self.error_buf
    }

    fn exit(&mut self, code: i32) {
        self.exit_code = Some(code);
    }
}

/// Two append-only output regions for generated C.
///
/// `header` collects everything that must precede the statement stream
/// (boilerplate, variable declarations emitted at first use); `code` collects
/// translated statements in source order. Neither region is inspected until
/// `finish` concatenates them.
#[derive(Debug, Default)]
pub struct Emitter {
    header: String,
    code: String,
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, fragment: &str) {
        self.code.push_str(fragment);
    }

    pub fn emit_line(&mut self, line: &str) {
        self.code.push_str(line);
        self.code.push('\n');
    }

    pub fn header_line(&mut self, line: &str) {
        self.header.push_str(line);
        self.header.push('\n');
    }

    pub fn finish(self) -> String {
        let mut artifact = self.header;
        artifact.push_str(&self.code);
        artifact
    }
}

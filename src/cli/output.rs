//! Colored terminal output for build and release tasks

use std::io::Write;
use termcolor::{Buffer, BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

/// Output manager for consistent colored terminal output
#[derive(Debug)]
pub struct OutputManager {
    bufwtr: BufferWriter,
    verbose: bool,
    quiet: bool,
}

impl Clone for OutputManager {
    fn clone(&self) -> Self {
        Self::new(self.verbose, self.quiet)
    }
}

impl OutputManager {
    /// Create a new output manager
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            bufwtr: BufferWriter::stdout(ColorChoice::Auto),
            verbose,
            quiet,
        }
    }

    /// Print `marker` in `marker_color`, then the message in `text_color`
    fn tagged(
        &self,
        marker: &str,
        marker_color: &ColorSpec,
        text_color: Option<&ColorSpec>,
        message: &str,
    ) -> std::io::Result<()> {
        let mut buffer = self.bufwtr.buffer();
        write_tagged(&mut buffer, marker, marker_color, text_color, message);
        self.bufwtr.print(&buffer)
    }

    /// Print an info message (normal output)
    pub fn info(&self, message: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.tagged("ℹ", &fg(Color::Cyan, false), None, message)
    }

    /// Print a success message
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.tagged("✓", &fg(Color::Green, true), None, message)
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.tagged(
            "⚠",
            &fg(Color::Yellow, true),
            Some(&fg(Color::Yellow, false)),
            message,
        )
    }

    /// Print an error message to stderr (always shown)
    pub fn error(&self, message: &str) {
        let bufwtr = BufferWriter::stderr(ColorChoice::Auto);
        let mut buffer = bufwtr.buffer();
        write_tagged(
            &mut buffer,
            "✗",
            &fg(Color::Red, true),
            Some(&fg(Color::Red, false)),
            message,
        );
        if bufwtr.print(&buffer).is_err() {
            // Stderr failed - fallback to stdout as last resort
            println!("[STDERR ERROR] ✗ {message}");
        }
    }

    /// Print a verbose/debug message (only in verbose mode)
    pub fn verbose(&self, message: &str) -> std::io::Result<()> {
        if !self.verbose || self.quiet {
            return Ok(());
        }
        self.tagged("→", &fg(Color::Blue, false), None, message)
    }

    /// Print a section header
    pub fn section(&self, title: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }

        let mut buffer = self.bufwtr.buffer();
        let _ = writeln!(&mut buffer);
        let _ = buffer.set_color(&fg(Color::Cyan, true));
        let _ = writeln!(&mut buffer, "═══ {title} ═══");
        let _ = buffer.reset();
        self.bufwtr.print(&buffer)
    }

    /// Print indented text (for sub-items)
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.println(&format!("    {message}"))
    }

    /// Print a plain message (respects quiet mode)
    pub fn println(&self, message: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }

        let mut buffer = self.bufwtr.buffer();
        let _ = writeln!(&mut buffer, "{message}");
        self.bufwtr.print(&buffer)
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
}

fn fg(color: Color, bold: bool) -> ColorSpec {
    let mut spec = ColorSpec::new();
    spec.set_fg(Some(color)).set_bold(bold);
    spec
}

fn write_tagged(
    buffer: &mut Buffer,
    marker: &str,
    marker_color: &ColorSpec,
    text_color: Option<&ColorSpec>,
    message: &str,
) {
    let _ = buffer.set_color(marker_color);
    let _ = write!(buffer, "{marker}");
    let _ = buffer.reset();
    if let Some(spec) = text_color {
        let _ = buffer.set_color(spec);
    }
    let _ = writeln!(buffer, " {message}");
    let _ = buffer.reset();
}
